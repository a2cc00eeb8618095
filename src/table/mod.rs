// src/table/mod.rs

mod extract;
mod html;
mod record;
mod source;

pub use extract::{Coercion, Extractor};
pub use html::HtmlTable;
pub use record::{Dataset, Record};
pub use source::{GridTable, RowCells, TableSource};
