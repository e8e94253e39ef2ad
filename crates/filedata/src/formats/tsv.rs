//! Tab-separated tables with a header row

use std::collections::BTreeMap;

use filedata_fs::{NormalizedPath, io};

use crate::data::FileData;
use crate::error::{Error, Result};
use crate::format::{FileFormat, TextRoundTrip};

/// Tab-separated files (`.tsv`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tsv;

/// Tab-separated table data.
pub type TsvData = FileData<Tsv>;

/// A header plus rows of string cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsvTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TsvTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    fn map_cells(self, f: impl Fn(String) -> String) -> Self {
        Self {
            columns: self.columns.into_iter().map(&f).collect(),
            rows: self
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(&f).collect())
                .collect(),
        }
    }
}

/// Options for reading and writing tables.
#[derive(Debug, Clone, Default)]
pub struct TsvOptions {
    /// Trim surrounding whitespace from every cell
    pub strip: bool,
}

fn strip_cell(cell: String) -> String {
    let trimmed = cell.trim();
    if trimmed.len() == cell.len() {
        cell
    } else {
        trimmed.to_string()
    }
}

fn check_cell(cell: &str) -> Result<()> {
    if cell.contains(['\t', '\n', '\r']) {
        return Err(Error::InvalidCell {
            cell: cell.to_string(),
        });
    }
    Ok(())
}

fn split_row(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}

impl FileFormat for Tsv {
    const NAME: &'static str = "tsv";
    const EXT: &'static str = ".tsv";

    type Data = TsvTable;
    type Options = TsvOptions;

    fn default_data() -> Self::Data {
        TsvTable::default()
    }

    fn load_raw(path: &NormalizedPath, options: &TsvOptions) -> Result<Self::Data> {
        let content = io::read_text(path)?;
        let mut lines = content.lines();
        let Some(header) = lines.next() else {
            return Ok(TsvTable::default());
        };

        let columns = split_row(header);
        let mut rows = Vec::new();
        for (index, line) in lines.enumerate() {
            let row = split_row(line);
            if row.len() != columns.len() {
                return Err(Error::format(
                    path,
                    Self::NAME,
                    format!(
                        "row {} has {} cells, expected {}",
                        index + 1,
                        row.len(),
                        columns.len()
                    ),
                ));
            }
            rows.push(row);
        }

        let table = TsvTable { columns, rows };
        Ok(if options.strip {
            table.map_cells(strip_cell)
        } else {
            table
        })
    }

    fn save_raw(data: &Self::Data, path: &NormalizedPath, options: &TsvOptions) -> Result<()> {
        let table = if options.strip {
            data.clone().map_cells(strip_cell)
        } else {
            data.clone()
        };

        let mut content = String::new();
        if !table.columns.is_empty() {
            content.push_str(&table.columns.join("\t"));
            content.push('\n');
            for row in &table.rows {
                content.push_str(&row.join("\t"));
                content.push('\n');
            }
        }
        io::write_text(path, &content)?;
        Ok(())
    }

    fn normalize(data: Self::Data) -> Result<Self::Data> {
        for cell in &data.columns {
            check_cell(cell)?;
        }
        let expected = data.columns.len();
        for (row, cells) in data.rows.iter().enumerate() {
            if cells.len() != expected || expected == 0 {
                return Err(Error::RaggedRow {
                    row,
                    found: cells.len(),
                    expected,
                });
            }
            for cell in cells {
                check_cell(cell)?;
            }
        }
        Ok(data)
    }
}

impl TextRoundTrip for Tsv {}

impl FileData<Tsv> {
    pub fn columns(&self) -> Vec<String> {
        self.data_ref().columns.clone()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.data_ref().rows.clone()
    }

    /// Number of rows, not counting the header.
    pub fn row_count(&self) -> usize {
        self.data_ref().rows.len()
    }

    /// Every cell of the column named `name`.
    pub fn column(&self, name: &str) -> Option<Vec<String>> {
        let table = self.data_ref();
        let index = table.columns.iter().position(|c| c == name)?;
        Some(table.rows.iter().map(|row| row[index].clone()).collect())
    }

    /// Rows keyed by column name.
    ///
    /// When a header repeats a name, the rightmost column wins.
    pub fn records(&self) -> Vec<BTreeMap<String, String>> {
        let table = self.data_ref();
        table
            .rows
            .iter()
            .map(|row| {
                table
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Append a row, which must have one cell per column.
    pub fn push_row<I>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        let expected = self.data_ref().columns.len();
        if row.len() != expected || expected == 0 {
            return Err(Error::RaggedRow {
                row: self.row_count(),
                found: row.len(),
                expected,
            });
        }
        for cell in &row {
            check_cell(cell)?;
        }
        self.data_mut().rows.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sample() -> TsvData {
        TsvData::new(TsvTable::new(
            strings(&["id", "name"]),
            vec![strings(&["1", "alpha"]), strings(&["2", "beta"])],
        ))
        .unwrap()
    }

    #[test]
    fn test_normalize_rejects_ragged_rows() {
        let table = TsvTable::new(strings(&["a", "b"]), vec![strings(&["1"])]);
        let err = TsvData::new(table).unwrap_err();
        assert!(matches!(err, Error::RaggedRow { row: 0, found: 1, expected: 2 }));
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_normalize_rejects_tabs_in_cells() {
        let table = TsvTable::new(strings(&["a"]), vec![strings(&["x\ty"])]);
        assert!(matches!(TsvData::new(table), Err(Error::InvalidCell { .. })));
    }

    #[test]
    fn test_column_and_records() {
        let data = sample();
        assert_eq!(data.column("name"), Some(strings(&["alpha", "beta"])));
        assert_eq!(data.column("missing"), None);

        let records = data.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"], "beta");
    }

    #[test]
    fn test_push_row() {
        let mut data = sample();
        data.push_row(["3", "gamma"]).unwrap();
        assert_eq!(data.row_count(), 3);
        assert!(data.push_row(["4"]).is_err());
        assert_eq!(data.row_count(), 3);
    }

    #[test]
    fn test_strip_cells() {
        let table = TsvTable::new(strings(&[" a "]), vec![strings(&["  x"])]);
        let stripped = table.map_cells(strip_cell);
        assert_eq!(stripped.columns, strings(&["a"]));
        assert_eq!(stripped.rows, vec![strings(&["x"])]);
    }
}
