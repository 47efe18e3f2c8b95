//! Slot ordering
//!
//! Produces the sequence in which grid cells receive source pages.

use super::{DirectionSpec, FastAxis, GridLayout, GridPosition, Horizontal, Vertical};

/// Order every cell of `grid` according to `direction`.
///
/// Yields a permutation of all `rows × cols` positions; the i-th source page
/// of a sheet goes to the i-th position. Positions are computed on demand,
/// so taking a prefix costs nothing for the cells never reached.
pub fn slot_order(
    grid: &GridLayout,
    direction: DirectionSpec,
) -> impl ExactSizeIterator<Item = GridPosition> {
    let GridLayout { rows, cols } = *grid;

    (0..grid.cell_count()).map(move |i| {
        let (row, col) = match direction.fast_axis {
            FastAxis::RowMajor => (i / cols, i % cols),
            FastAxis::ColumnMajor => (i % rows, i / rows),
        };
        let row = match direction.vertical {
            Vertical::TopToBottom => row,
            Vertical::BottomToTop => rows - 1 - row,
        };
        let col = match direction.horizontal {
            Horizontal::LeftToRight => col,
            Horizontal::RightToLeft => cols - 1 - col,
        };
        GridPosition::new(row, col)
    })
}
