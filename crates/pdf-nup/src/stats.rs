use crate::layout::layout;
use crate::options::NupOptions;
use crate::render::read_source_pages;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for an n-up run without rendering anything
pub fn calculate_statistics(document: &Document, options: &NupOptions) -> Result<NupStatistics> {
    options.validate()?;

    let pages = read_source_pages(document)?;
    let sheets = layout(&pages, options)?;

    let n = options.pages_per_sheet;
    let grid = sheets.grid();
    let output_sheets = sheets.len();
    let empty_slots = match pages.len() % n {
        0 => 0,
        filled => n - filled,
    };

    Ok(NupStatistics {
        source_pages: pages.len(),
        pages_per_sheet: n,
        rows: grid.rows,
        cols: grid.cols,
        output_sheets,
        empty_slots,
        sheet_size_pt: sheets.sheet_size(),
    })
}
