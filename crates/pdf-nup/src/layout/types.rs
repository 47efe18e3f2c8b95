//! Layout data types for n-up sheets
//!
//! These types are a pure description of where every source page lands.
//! They carry no PDF objects; the render module turns them into content.

use crate::constants::PLACEMENT_EPSILON;
use crate::types::{Orientation, Rotation};

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Grid dimensions for one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of rows in the page grid
    pub rows: usize,
    /// Number of columns in the page grid
    pub cols: usize,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies inside this rectangle, allowing for float error
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - PLACEMENT_EPSILON
            && other.y >= self.y - PLACEMENT_EPSILON
            && other.right() <= self.right() + PLACEMENT_EPSILON
            && other.top() <= self.top() + PLACEMENT_EPSILON
    }
}

/// A page of the source document, as read once at open time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePage {
    /// Zero-based index in the source document
    pub index: usize,
    /// The page's MediaBox in its own user space
    pub media_box: Rect,
    /// The page's `/Rotate` flag
    pub rotation: Rotation,
}

impl SourcePage {
    pub fn new(index: usize, media_box: Rect, rotation: Rotation) -> Self {
        Self {
            index,
            media_box,
            rotation,
        }
    }
}

/// One grid cell on a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Position in grid (row 0 is top)
    pub grid_pos: GridPosition,
    /// Cell bounds in sheet coordinates
    pub rect: Rect,
}

/// Placement of a source page into its slot.
///
/// Applied in this order: move the MediaBox origin to (0, 0), rotate
/// clockwise by `rotation` so the page is upright, scale by (`sx`, `sy`),
/// translate by (`tx`, `ty`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub sx: f32,
    pub sy: f32,
    pub rotation: Rotation,
    pub tx: f32,
    pub ty: f32,
}

/// A source page paired with its slot and transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAssignment {
    pub page: SourcePage,
    pub slot: Slot,
    pub transform: Transform,
}

/// Layout of a single output sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Zero-based sheet number
    pub index: usize,
    /// Sheet width in points
    pub width: f32,
    /// Sheet height in points
    pub height: f32,
    pub orientation: Orientation,
    pub grid: GridLayout,
    /// Assignments in source page order
    pub assignments: Vec<SlotAssignment>,
}

impl Sheet {
    /// Number of slots on the sheet
    pub fn capacity(&self) -> usize {
        self.grid.cell_count()
    }

    /// Number of slots left without a page
    pub fn empty_slots(&self) -> usize {
        self.capacity() - self.assignments.len()
    }

    /// Indices of the source pages on this sheet, in placement order
    pub fn source_indices(&self) -> Vec<usize> {
        self.assignments.iter().map(|a| a.page.index).collect()
    }
}
