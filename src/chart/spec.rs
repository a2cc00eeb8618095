use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::table::Dataset;

/// Which renderer the chart library should use for a spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    Line,
    Bar,
}

/// One plotted series: a color and the extracted points.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub color: String,
    pub data: Dataset,
}

/// A seconds-unit time x-axis.
#[derive(Debug, Clone, Serialize)]
pub struct TimeAxis {
    pub time_unit: String,
}

impl TimeAxis {
    pub fn seconds() -> Self {
        Self {
            time_unit: "seconds".to_string(),
        }
    }
}

/// A value y-axis with abbreviated (K/M/B/T) tick labels.
#[derive(Debug, Clone, Serialize)]
pub struct ValueAxis {
    pub orientation: String,
    pub tick_format: String,
}

impl ValueAxis {
    pub fn left_abbreviated() -> Self {
        Self {
            orientation: "left".to_string(),
            tick_format: "kmbt".to_string(),
        }
    }
}

/// Renderer-ready description of a single chart: everything the drawing
/// collaborator needs except the drawing itself.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub renderer: Renderer,
    pub width: u32,
    pub height: u32,
    pub series: Vec<Series>,
    pub x_axis: TimeAxis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<ValueAxis>,
}

/// One chart found in a document: the class of the table it was read from,
/// plus the spec built from it.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle {
    pub source: String,
    pub spec: ChartSpec,
}

/// Everything extracted from one document, as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentCharts {
    pub document: String,
    pub generated_at: DateTime<Utc>,
    pub charts: Vec<ChartBundle>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Record;

    #[test]
    fn line_spec_serializes_with_y_axis() {
        let mut point = Record::new();
        point.set("x", 0.0);
        point.set("y", 1.5);
        let spec = ChartSpec {
            renderer: Renderer::Line,
            width: 760,
            height: 100,
            series: vec![Series {
                color: "steelblue".to_string(),
                data: vec![point],
            }],
            x_axis: TimeAxis::seconds(),
            y_axis: Some(ValueAxis::left_abbreviated()),
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["renderer"], "line");
        assert_eq!(json["series"][0]["color"], "steelblue");
        assert_eq!(json["series"][0]["data"][0]["y"], 1.5);
        assert_eq!(json["x_axis"]["time_unit"], "seconds");
        assert_eq!(json["y_axis"]["orientation"], "left");
    }

    #[test]
    fn bar_spec_omits_absent_y_axis() {
        let spec = ChartSpec {
            renderer: Renderer::Bar,
            width: 760,
            height: 100,
            series: Vec::new(),
            x_axis: TimeAxis::seconds(),
            y_axis: None,
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["renderer"], "bar");
        assert!(json.get("y_axis").is_none());
    }
}
