//! Layout calculation modules for n-up sheets
//!
//! This module handles all the geometric calculations:
//! - Grid resolution (pages per sheet to rows and columns)
//! - Slot ordering (which cell receives the next source page)
//! - Content placement (rotation, scaling, translation)
//! - Sheet building (batching pages into sheets)

mod direction;
mod grid;
mod order;
mod placement;
mod sheet;
mod types;

pub use direction::*;
pub use grid::*;
pub use order::*;
pub use placement::*;
pub use sheet::*;
pub use types::*;
