/// One row of a source table: its header cells and data cells, in document
/// order. Cell text is already flattened to plain strings, so consumers never
/// touch the structure that owns the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowCells {
    /// Text of each header cell (`<th>`) in this row.
    pub header: Vec<String>,
    /// Text of each data cell (`<td>`) in this row.
    pub data: Vec<String>,
}

impl RowCells {
    /// A row consisting only of header cells.
    pub fn header<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: cells.into_iter().map(Into::into).collect(),
            data: Vec::new(),
        }
    }

    /// A row consisting only of data cells.
    pub fn data<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: Vec::new(),
            data: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only view of a table-like structure.
///
/// Implementations enumerate every row in document order, header rows
/// included; the extractor decides which rows carry data. Keeping the trait
/// this small lets the extraction core run against plain in-memory grids in
/// tests, with no document anywhere in sight.
pub trait TableSource {
    /// All rows in document order.
    fn rows(&self) -> Vec<RowCells>;

    /// Every header cell in the table, in document order.
    fn header_cells(&self) -> Vec<String> {
        self.rows().into_iter().flat_map(|row| row.header).collect()
    }
}

/// An in-memory table, for tests and for callers whose data never lived in a
/// document.
#[derive(Debug, Clone, Default)]
pub struct GridTable {
    rows: Vec<RowCells>,
}

impl GridTable {
    pub fn new(rows: Vec<RowCells>) -> Self {
        Self { rows }
    }

    /// Append a row.
    pub fn push(&mut self, row: RowCells) {
        self.rows.push(row);
    }
}

impl TableSource for GridTable {
    fn rows(&self) -> Vec<RowCells> {
        self.rows.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_cells_flatten_across_rows() {
        let table = GridTable::new(vec![
            RowCells::header(["x", "y"]),
            RowCells::data(["1", "2"]),
            // a row-level header cell further down still counts, in order
            RowCells {
                header: vec!["z".to_string()],
                data: vec!["3".to_string()],
            },
        ]);
        assert_eq!(table.header_cells(), vec!["x", "y", "z"]);
    }

    #[test]
    fn rows_preserve_document_order() {
        let mut table = GridTable::default();
        table.push(RowCells::data(["a"]));
        table.push(RowCells::default());
        table.push(RowCells::data(["b"]));

        let rows = table.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].data, vec!["a"]);
        assert!(rows[1].data.is_empty() && rows[1].header.is_empty());
        assert_eq!(rows[2].data, vec!["b"]);
    }
}
