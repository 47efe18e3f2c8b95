use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl Orientation {
    /// Orientation of a box with the given dimensions. Square boxes count as portrait.
    pub fn of(width: f32, height: f32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// The other orientation
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }

    /// Reorder (width, height) so the pair has this orientation
    pub fn apply(self, (w, h): (f32, f32)) -> (f32, f32) {
        let (short, long) = if w <= h { (w, h) } else { (h, w) };
        match self {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

/// How the output sheet orientation is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrientationPolicy {
    /// Keep the source orientation for square grids, turn it for half-square grids
    #[default]
    Auto,
    Landscape,
    Portrait,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Dimensions in points, as given (no orientation applied)
    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (crate::constants::mm_to_pt(w), crate::constants::mm_to_pt(h))
    }
}

/// Target size of the output sheets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetSize {
    /// Same paper as the first source page
    #[default]
    MatchSource,
    /// A fixed paper size
    Paper(PaperSize),
}

/// Page scaling behavior when a source page and its slot differ in shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMode {
    /// Stretch each axis independently to fill the slot (may distort)
    #[default]
    Fill,
    /// Uniform scale that fits inside the slot, centered (letterbox)
    Fit,
}

/// Clockwise page rotation, as carried by a page's `/Rotate` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Normalize an arbitrary multiple of 90 degrees (negative values included).
    ///
    /// Returns `None` for angles that are not a multiple of 90.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Clockwise180),
            270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }

    /// Whether the displayed page has width and height exchanged
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }
}

/// Statistics about an n-up run
#[derive(Debug, Clone, PartialEq)]
pub struct NupStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Pages placed on each sheet
    pub pages_per_sheet: usize,
    /// Grid rows on each sheet
    pub rows: usize,
    /// Grid columns on each sheet
    pub cols: usize,
    /// Number of output sheets
    pub output_sheets: usize,
    /// Slots left empty on the final sheet
    pub empty_slots: usize,
    /// Output sheet dimensions in points
    pub sheet_size_pt: (f32, f32),
}
