use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::warn;

use crate::chart::options::{KindOptions, ScanOptions};
use crate::chart::spec::{ChartBundle, ChartSpec, Renderer, Series, TimeAxis, ValueAxis};
use crate::table::{Extractor, HtmlTable};

// `data-source` values get spliced into a class selector, so they must be a
// single CSS class token.
static CLASS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").expect("class token regex"));

/// Scan a parsed document for chart sections and build one bundle per
/// section whose data table can be found.
///
/// Line sections come first, then histogram sections, each in document
/// order. A section with a missing or unusable `data-source`, or whose
/// table is absent, is logged and skipped; it never aborts the rest of the
/// scan.
pub fn scan_document(document: &Html, options: &ScanOptions) -> Vec<ChartBundle> {
    let mut charts = Vec::new();
    scan_kind(document, options, &options.line, Renderer::Line, &mut charts);
    scan_kind(
        document,
        options,
        &options.histogram,
        Renderer::Bar,
        &mut charts,
    );
    charts
}

fn scan_kind(
    document: &Html,
    options: &ScanOptions,
    kind: &KindOptions,
    renderer: Renderer,
    charts: &mut Vec<ChartBundle>,
) {
    let raw = format!(".{}", kind.class);
    let selector = match Selector::parse(&raw) {
        Ok(selector) => selector,
        Err(e) => {
            warn!(class = %kind.class, "unusable section class: {}", e);
            return;
        }
    };

    for section in document.select(&selector) {
        let source = match section.value().attr("data-source") {
            Some(source) if CLASS_TOKEN.is_match(source) => source,
            Some(source) => {
                warn!(class = %kind.class, source, "data-source is not a class token; skipping section");
                continue;
            }
            None => {
                warn!(class = %kind.class, "section has no data-source attribute; skipping");
                continue;
            }
        };

        // token already validated, so only absence is left to handle
        let table = match HtmlTable::by_class(document, source) {
            Ok(Some(table)) => table,
            Ok(None) => {
                warn!(source, "no table with data-source class; skipping section");
                continue;
            }
            Err(err) => {
                warn!(source, "table lookup failed: {}; skipping section", err);
                continue;
            }
        };

        let data = Extractor::new()
            .fields(kind.fields.clone())
            .with_index(kind.with_index)
            .coercion(kind.coercion)
            .extract(&table);

        charts.push(ChartBundle {
            source: source.to_string(),
            spec: ChartSpec {
                renderer,
                width: options.width,
                height: options.height,
                series: vec![Series {
                    color: kind.color.clone(),
                    data,
                }],
                x_axis: TimeAxis::seconds(),
                y_axis: match renderer {
                    Renderer::Line => Some(ValueAxis::left_abbreviated()),
                    Renderer::Bar => None,
                },
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html><body>
          <div class="rs-line" data-source="throughput"><div class="chart"></div></div>
          <div class="rs-histogram" data-source="degrees"><div class="chart"></div></div>

          <table class="throughput">
            <tr><th>time</th><th>value</th></tr>
            <tr><td>1.5</td><td>2.5</td></tr>
            <tr><td>3.5</td><td>4.5</td></tr>
          </table>
          <table class="degrees">
            <tr><td>0</td><td>12</td></tr>
            <tr><td>1</td><td>7</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn scans_line_and_histogram_sections() {
        let document = Html::parse_document(DOC);
        let charts = scan_document(&document, &ScanOptions::default());

        assert_eq!(charts.len(), 2);

        let line = &charts[0];
        assert_eq!(line.source, "throughput");
        assert_eq!(line.spec.renderer, Renderer::Line);
        assert_eq!(line.spec.width, 760);
        assert_eq!(line.spec.height, 100);
        assert_eq!(line.spec.series[0].color, "steelblue");
        assert!(line.spec.y_axis.is_some());
        // indexed: x is the row position, y the first cell
        let points = &line.spec.series[0].data;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].get("x"), Some(1.0));
        assert_eq!(points[0].get("y"), Some(1.5));

        let histo = &charts[1];
        assert_eq!(histo.source, "degrees");
        assert_eq!(histo.spec.renderer, Renderer::Bar);
        assert_eq!(histo.spec.series[0].color, "maroon");
        assert!(histo.spec.y_axis.is_none());
        // not indexed: cells map straight onto the fields
        let points = &histo.spec.series[0].data;
        assert_eq!(points[0].get("x"), Some(0.0));
        assert_eq!(points[0].get("y"), Some(12.0));
    }

    #[test]
    fn bad_sections_are_skipped_without_aborting_the_scan() {
        let doc = r#"
            <html><body>
              <div class="rs-line"></div>
              <div class="rs-line" data-source="no such table"></div>
              <div class="rs-line" data-source="missing"></div>
              <div class="rs-line" data-source="good"></div>
              <table class="good">
                <tr><td>1.0</td><td>2.0</td></tr>
              </table>
            </body></html>
        "#;
        let document = Html::parse_document(doc);
        let charts = scan_document(&document, &ScanOptions::default());

        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].source, "good");
    }

    #[test]
    fn document_without_sections_yields_no_charts() {
        let document = Html::parse_document("<html><body><p>plain</p></body></html>");
        assert!(scan_document(&document, &ScanOptions::default()).is_empty());
    }
}
