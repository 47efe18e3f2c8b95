//! Sheet building
//!
//! Batches source pages into sheets of `n` and assigns each page a slot
//! and a transform. The result is a lazy iterator of pure [`Sheet`]
//! descriptions; nothing here touches PDF objects.

use std::slice::Chunks;

use crate::options::NupOptions;
use crate::types::*;

use super::{
    GridLayout, Rect, Sheet, Slot, SlotAssignment, SourcePage, cell_bounds, effective_size,
    is_half_square, resolve_grid, slot_order, slot_transform,
};

/// Lay out `pages` onto sheets according to `options`.
///
/// Fails eagerly: an unsupported pages-per-sheet count is a configuration
/// error and an empty page list (or a page with an empty box) is a
/// validation error. Iterating the result yields one [`Sheet`] per group of
/// `n` consecutive pages; the last sheet may be partially filled.
pub fn layout<'a>(pages: &'a [SourcePage], options: &NupOptions) -> Result<Sheets<'a>> {
    let n = options.pages_per_sheet;
    // Reject the count before looking at the pages
    resolve_grid(n, Orientation::Portrait)?;

    let first = pages
        .first()
        .ok_or_else(|| NupError::Validation("source document has no pages".to_string()))?;

    if let Some(bad) = pages
        .iter()
        .find(|p| !(p.media_box.width > 0.0 && p.media_box.height > 0.0))
    {
        return Err(NupError::Validation(format!(
            "page {} has an empty MediaBox ({} x {})",
            bad.index + 1,
            bad.media_box.width,
            bad.media_box.height
        )));
    }

    let (width, height, orientation) = sheet_dimensions(first, options);
    let grid = resolve_grid(n, orientation)?;
    let area = Rect::new(0.0, 0.0, width, height);

    // Sheets fill slots from the front, so no sheet gets past the page count
    let slots = slot_order(&grid, options.direction)
        .take(n.min(pages.len()))
        .map(|grid_pos| Slot {
            grid_pos,
            rect: cell_bounds(&grid, grid_pos, &area),
        })
        .collect();

    log::debug!(
        "{} pages, {}-up on {:.1} x {:.1} pt ({:?}), grid {} x {}, {}",
        pages.len(),
        n,
        width,
        height,
        orientation,
        grid.rows,
        grid.cols,
        options.direction
    );

    Ok(Sheets {
        chunks: pages.chunks(n),
        slots,
        grid,
        width,
        height,
        orientation,
        scaling_mode: options.scaling_mode,
        next_index: 0,
    })
}

/// Determine the sheet size and orientation from the first page.
///
/// With `Auto` orientation a square grid keeps the source orientation and a
/// half-square grid turns it, so two source-shaped cells share one sheet.
fn sheet_dimensions(first: &SourcePage, options: &NupOptions) -> (f32, f32, Orientation) {
    let (eff_w, eff_h) = effective_size(first);
    let source_orientation = Orientation::of(eff_w, eff_h);

    let orientation = match options.orientation {
        OrientationPolicy::Auto if is_half_square(options.pages_per_sheet) => {
            source_orientation.flipped()
        }
        OrientationPolicy::Auto => source_orientation,
        OrientationPolicy::Landscape => Orientation::Landscape,
        OrientationPolicy::Portrait => Orientation::Portrait,
    };

    let base = match options.sheet_size {
        SheetSize::MatchSource => (eff_w, eff_h),
        SheetSize::Paper(paper) => paper.dimensions_pt(),
    };

    let (width, height) = orientation.apply(base);
    (width, height, orientation)
}

/// Lazy sequence of sheets produced by [`layout`].
///
/// Finite and not resumable; call [`layout`] again to start over.
#[derive(Debug, Clone)]
pub struct Sheets<'a> {
    chunks: Chunks<'a, SourcePage>,
    /// Leading slots in fill order, as many as one sheet can use
    slots: Vec<Slot>,
    grid: GridLayout,
    width: f32,
    height: f32,
    orientation: Orientation,
    scaling_mode: ScalingMode,
    next_index: usize,
}

impl Sheets<'_> {
    /// Grid shared by every sheet
    pub fn grid(&self) -> GridLayout {
        self.grid
    }

    /// Sheet (width, height) in points
    pub fn sheet_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl Iterator for Sheets<'_> {
    type Item = Sheet;

    fn next(&mut self) -> Option<Sheet> {
        let pages = self.chunks.next()?;

        let assignments = pages
            .iter()
            .zip(self.slots.iter())
            .map(|(page, slot)| SlotAssignment {
                page: *page,
                slot: *slot,
                transform: slot_transform(page, &slot.rect, self.scaling_mode),
            })
            .collect();

        let sheet = Sheet {
            index: self.next_index,
            width: self.width,
            height: self.height,
            orientation: self.orientation,
            grid: self.grid,
            assignments,
        };
        self.next_index += 1;
        Some(sheet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Sheets<'_> {}
