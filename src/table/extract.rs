use serde::{Deserialize, Serialize};

use crate::table::record::{Dataset, Record};
use crate::table::source::TableSource;

/// How cell text becomes a number.
///
/// Report tables carry both fractional series (rates, timings) and strictly
/// integral ones (bucket counts, epochs); which one a chart wants is the
/// caller's call, so the mode is explicit rather than baked in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    /// Longest numeric prefix parsed as a float: `"2.5 s"` → 2.5.
    #[default]
    Float,
    /// Optional sign plus leading digit run: `"42.9"` → 42, `"1e3"` → 1.
    Integer,
}

impl Coercion {
    /// Best-effort conversion of cell text. Unparseable text yields NaN;
    /// coercion never fails.
    pub fn parse(self, text: &str) -> f64 {
        let text = text.trim_start();
        match self {
            Coercion::Float => fast_float2::parse_partial::<f64, _>(text)
                .map(|(value, _)| value)
                .unwrap_or(f64::NAN),
            Coercion::Integer => {
                let (negative, rest) = match text.as_bytes().first() {
                    Some(b'-') => (true, &text[1..]),
                    Some(b'+') => (false, &text[1..]),
                    _ => (false, text),
                };
                let digits = rest
                    .as_bytes()
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits == 0 {
                    return f64::NAN;
                }
                let value = match atoi_simd::parse::<i64>(&rest.as_bytes()[..digits]) {
                    Ok(value) => value as f64,
                    // digit run longer than i64: degrade to a float parse
                    Err(_) => fast_float2::parse_partial::<f64, _>(&rest[..digits])
                        .map(|(value, _)| value)
                        .unwrap_or(f64::NAN),
                };
                if negative {
                    -value
                } else {
                    value
                }
            }
        }
    }
}

/// Converts a table of textual cells into an ordered sequence of numeric
/// records, one per data row.
///
/// Field names come from [`fields`](Self::fields) or, when omitted, from the
/// table's header cells in document order. With
/// [`with_index`](Self::with_index) the first field is synthesized from the
/// row's position in the full row enumeration — header and divider rows
/// count — and data cells shift to the remaining fields.
///
/// ```
/// use chartscrape::table::{Extractor, GridTable, RowCells};
///
/// let table = GridTable::new(vec![
///     RowCells::header(["x", "y"]),
///     RowCells::data(["1.5", "2.5"]),
/// ]);
/// let data = Extractor::new().extract(&table);
/// assert_eq!(data[0].get("x"), Some(1.5));
/// assert_eq!(data[0].get("y"), Some(2.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    fields: Option<Vec<String>>,
    with_index: bool,
    coercion: Coercion,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these field names instead of inferring them from header cells.
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Reserve the first field for the row's position in the table
    /// (default: false).
    pub fn with_index(mut self, with_index: bool) -> Self {
        self.with_index = with_index;
        self
    }

    /// Numeric coercion mode for cell text (default: float).
    pub fn coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    /// Run the extraction. Never fails: unparseable cells degrade to NaN,
    /// surplus cells are dropped, and missing cells leave fields absent.
    pub fn extract<T: TableSource>(&self, table: &T) -> Dataset {
        let fields = match &self.fields {
            Some(names) => names.clone(),
            None => table.header_cells(),
        };
        let offset = usize::from(self.with_index);

        let mut data = Dataset::new();
        for (position, row) in table.rows().iter().enumerate() {
            if row.data.is_empty() {
                continue;
            }
            let mut record = Record::new();
            if self.with_index {
                if let Some(name) = fields.first() {
                    record.set(name.clone(), position as f64);
                }
            }
            for (i, cell) in row.data.iter().enumerate() {
                // Cells shift one field right when the index occupies the
                // first field; anything past the declared names is dropped.
                match fields.get(i + offset) {
                    Some(name) => record.set(name.clone(), self.coercion.parse(cell)),
                    None => break,
                }
            }
            data.push(record);
        }
        data
    }
}
