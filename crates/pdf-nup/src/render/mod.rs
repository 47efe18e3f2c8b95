//! PDF rendering modules for n-up sheets
//!
//! This module handles all PDF-specific operations:
//! - Reading page geometry from the source document
//! - Creating XObjects from source pages
//! - Building output pages from sheet layouts
//! - Copying shared objects such as fonts once per output

mod sheet;
mod source;
mod xobject;

pub use sheet::SheetRenderer;
pub use source::{inherited_attribute, page_ids, read_source_pages};
pub use xobject::{ObjectCopier, create_page_xobject};
