//! Grid resolution
//!
//! Turns a pages-per-sheet count into a grid and computes the cell
//! rectangles of that grid on a sheet.

use crate::types::{NupError, Orientation, Result};

use super::{GridLayout, GridPosition, Rect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Resolve `n` pages per sheet into a grid.
///
/// Perfect squares give a square grid. Twice a perfect square (`2·m²`)
/// gives `m × 2m` on a landscape sheet and `2m × m` on a portrait sheet.
/// Every other count is rejected.
pub fn resolve_grid(n: usize, orientation: Orientation) -> Result<GridLayout> {
    if n == 0 {
        return Err(unsupported(n));
    }

    if let Some(side) = exact_sqrt(n) {
        return Ok(GridLayout::new(side, side));
    }

    if n % 2 == 0 {
        if let Some(m) = exact_sqrt(n / 2) {
            return Ok(match orientation {
                Orientation::Landscape => GridLayout::new(m, 2 * m),
                Orientation::Portrait => GridLayout::new(2 * m, m),
            });
        }
    }

    Err(unsupported(n))
}

/// Whether `n` is a supported pages-per-sheet count
pub fn is_supported(n: usize) -> bool {
    resolve_grid(n, Orientation::Portrait).is_ok()
}

/// Whether `n` resolves to a half-square (non-square) grid
pub fn is_half_square(n: usize) -> bool {
    n > 0 && exact_sqrt(n).is_none() && is_supported(n)
}

fn unsupported(n: usize) -> NupError {
    NupError::Configuration(format!(
        "{} pages per sheet is not supported; use a square (1, 4, 9, 16, ...) \
         or twice a square (2, 8, 18, 32, ...)",
        n
    ))
}

/// Integer square root, if `n` is a perfect square
fn exact_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    // Check neighbours too; the float estimate can be off by one for large n
    [root.saturating_sub(1), root, root + 1]
        .into_iter()
        .find(|r| r.checked_mul(*r) == Some(n))
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Calculate the bounds of a cell at the given grid position.
///
/// # Arguments
/// * `grid` - The grid layout
/// * `pos` - Grid position (row, col)
/// * `area` - The sheet area the grid divides
pub fn cell_bounds(grid: &GridLayout, pos: GridPosition, area: &Rect) -> Rect {
    let cell_width = area.width / grid.cols as f32;
    let cell_height = area.height / grid.rows as f32;

    // Row 0 is at the top, so we need to invert the y calculation
    let cell_x = area.x + pos.col as f32 * cell_width;
    let cell_y = area.y + (grid.rows - pos.row - 1) as f32 * cell_height;

    Rect::new(cell_x, cell_y, cell_width, cell_height)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_grids() {
        for (n, side) in [(1, 1), (4, 2), (9, 3), (16, 4), (25, 5), (100, 10)] {
            let grid = resolve_grid(n, Orientation::Portrait).unwrap();
            assert_eq!((grid.rows, grid.cols), (side, side), "n = {}", n);
        }
    }

    #[test]
    fn test_half_square_follows_orientation() {
        let landscape = resolve_grid(8, Orientation::Landscape).unwrap();
        assert_eq!((landscape.rows, landscape.cols), (2, 4));

        let portrait = resolve_grid(8, Orientation::Portrait).unwrap();
        assert_eq!((portrait.rows, portrait.cols), (4, 2));

        let two_up = resolve_grid(2, Orientation::Landscape).unwrap();
        assert_eq!((two_up.rows, two_up.cols), (1, 2));
    }

    #[test]
    fn test_supported_counts_fill_grid() {
        for n in [1, 2, 4, 8, 9, 16, 18, 25, 32, 36, 49, 50, 64, 72] {
            for orientation in [Orientation::Portrait, Orientation::Landscape] {
                let grid = resolve_grid(n, orientation).unwrap();
                assert_eq!(grid.cell_count(), n);
            }
        }
    }

    #[test]
    fn test_unsupported_counts() {
        for n in [0, 3, 5, 6, 7, 10, 12, 15, 17, 24] {
            match resolve_grid(n, Orientation::Landscape) {
                Err(NupError::Configuration(msg)) => assert!(msg.contains(&n.to_string())),
                other => panic!("n = {}: expected configuration error, got {:?}", n, other),
            }
        }
    }

    #[test]
    fn test_half_square_detection() {
        assert!(is_half_square(2));
        assert!(is_half_square(18));
        assert!(!is_half_square(4));
        assert!(!is_half_square(3));
        assert!(!is_half_square(0));
    }

    #[test]
    fn test_cell_bounds() {
        let grid = GridLayout::new(2, 2);
        let area = Rect::new(0.0, 0.0, 800.0, 600.0);

        // Bottom-left cell (row 1, col 0)
        let bounds = cell_bounds(&grid, GridPosition::new(1, 0), &area);
        assert_eq!(bounds, Rect::new(0.0, 0.0, 400.0, 300.0));

        // Top-right cell (row 0, col 1)
        let bounds = cell_bounds(&grid, GridPosition::new(0, 1), &area);
        assert_eq!(bounds, Rect::new(400.0, 300.0, 400.0, 300.0));
    }
}
