use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::table::Coercion;

/// Per-kind scan settings: which class marks the sections, and how to chart
/// what they point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindOptions {
    /// Class that marks a chart section of this kind.
    pub class: String,
    /// Series color passed through to the renderer.
    pub color: String,
    /// Field names the extracted records use, in order.
    pub fields: Vec<String>,
    /// Whether the first field is synthesized from row position.
    pub with_index: bool,
    /// Numeric coercion mode for cell text.
    pub coercion: Coercion,
}

/// Scan configuration. The defaults are the values the report pages have
/// always used: line sections indexed by row position, histogram sections
/// plotted cell-for-cell, both 760×100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub width: u32,
    pub height: u32,
    pub line: KindOptions,
    pub histogram: KindOptions,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            width: 760,
            height: 100,
            line: KindOptions {
                class: "rs-line".to_string(),
                color: "steelblue".to_string(),
                fields: vec!["x".to_string(), "y".to_string()],
                with_index: true,
                coercion: Coercion::Float,
            },
            histogram: KindOptions {
                class: "rs-histogram".to_string(),
                color: "maroon".to_string(),
                fields: vec!["x".to_string(), "y".to_string()],
                with_index: false,
                coercion: Coercion::Float,
            },
        }
    }
}

impl ScanOptions {
    /// Load options from a YAML file. Top-level keys left out of the file
    /// keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading options file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing options file {}", path.display()))
    }
}
