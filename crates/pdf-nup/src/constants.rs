//! Shared constants for n-up layout
//!
//! This module centralizes magic numbers and defaults used throughout
//! the layout and rendering process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Layout Defaults
// =============================================================================

/// Pages placed on each sheet unless configured otherwise
pub const DEFAULT_PAGES_PER_SHEET: usize = 4;

/// Output file name pattern used when only an input path is given
pub const DEFAULT_OUTPUT_PATTERN: &str = "{base}-{n}up{ext}";

/// Tolerance when checking that placed content stays inside its slot (points)
pub const PLACEMENT_EPSILON: f32 = 1e-3;

// =============================================================================
// Output Document
// =============================================================================

/// PDF version written to output documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";

/// Prefix of the XObject resource names on each output page
pub const XOBJECT_NAME_PREFIX: &str = "P";
