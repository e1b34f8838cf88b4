// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// A delimited-text table as delivered by the data source. Row 0 is the
/// header; a table without rows has not been loaded yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn from_strs(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header().iter().position(|column| column == name)
    }

    /// Cell text, or `""` when the row is shorter than the header.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        (1..self.rows.len()).map(move |row| self.cell(row, column))
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Both datasets of one successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedTables {
    pub summary: RawTable,
    pub details: RawTable,
}

#[cfg(test)]
mod tests {
    use super::RawTable;

    #[test]
    fn empty_table_has_no_header() {
        let table = RawTable::default();
        assert!(table.is_empty());
        assert!(table.header().is_empty());
        assert_eq!(table.data_row_count(), 0);
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let table = RawTable::from_strs(&[&["a", "b", "c"], &["1"]]);
        assert_eq!(table.cell(1, 0), "1");
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.cell(9, 0), "");
    }

    #[test]
    fn column_lookup_is_exact() {
        let table = RawTable::from_strs(&[&["date", "heure"]]);
        assert_eq!(table.column_index("heure"), Some(1));
        assert_eq!(table.column_index("Heure"), None);
    }

    #[test]
    fn column_values_skip_header() {
        let table = RawTable::from_strs(&[&["n"], &["3"], &[]]);
        assert_eq!(table.column_values(0).collect::<Vec<_>>(), vec!["3", ""]);
    }
}
