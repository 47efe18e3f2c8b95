pub mod constants;
pub mod io;
pub mod layout;
mod nup;
mod options;
pub mod render;
mod stats;
mod types;

pub use io::{ReadSeek, Sink, Source, load_pdf, resolve_output, save_pdf};
pub use layout::{DirectionSpec, Sheet, SourcePage, layout, resolve_grid, slot_order};
pub use nup::{layout_nup, nup_document, nup_file};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
