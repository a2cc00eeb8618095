use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use crate::table::source::{RowCells, TableSource};

/// A table element inside a parsed HTML document, viewed as a [`TableSource`].
///
/// Rows are the table's descendant `<tr>` elements in document order; within a
/// row, `<th>` descendants are header cells and `<td>` descendants are data
/// cells. Cell text is the concatenated descendant text with surrounding
/// whitespace trimmed. Header-only rows therefore show up with zero data
/// cells, which the extractor counts but skips.
pub struct HtmlTable<'a> {
    table: ElementRef<'a>,
}

impl<'a> HtmlTable<'a> {
    /// Wrap an already-located table element.
    pub fn new(table: ElementRef<'a>) -> Self {
        Self { table }
    }

    /// Find the first element in `document` bearing `class`. Returns `None`
    /// when no element matches; errors only if `class` does not form a valid
    /// selector.
    pub fn by_class(document: &'a Html, class: &str) -> Result<Option<Self>> {
        let raw = format!(".{}", class);
        let selector = Selector::parse(&raw)
            .map_err(|e| anyhow!("invalid table selector {}: {}", raw, e))?;
        Ok(document.select(&selector).next().map(Self::new))
    }
}

impl TableSource for HtmlTable<'_> {
    fn rows(&self) -> Vec<RowCells> {
        let tr = Selector::parse("tr").expect("tr selector should parse");
        let th = Selector::parse("th").expect("th selector should parse");
        let td = Selector::parse("td").expect("td selector should parse");

        self.table
            .select(&tr)
            .map(|row| RowCells {
                header: row.select(&th).map(cell_text).collect(),
                data: row.select(&td).map(cell_text).collect(),
            })
            .collect()
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
