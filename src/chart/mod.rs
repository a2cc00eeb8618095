// src/chart/mod.rs

mod options;
mod scan;
mod spec;

pub use options::{KindOptions, ScanOptions};
pub use scan::scan_document;
pub use spec::{ChartBundle, ChartSpec, DocumentCharts, Renderer, Series, TimeAxis, ValueAxis};
