//! CSV import adapter
//!
//! Turns raw CSV text with a header row into rows keyed by header name.
//! Values stay strings; consumers parse what they need.

use crate::error::{ImportError, ImportKind};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One data row, keyed by header name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    line: u64,
    fields: HashMap<String, String>,
}

impl CsvRow {
    /// 1-based line number in the source file
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Get a column that must hold a non-empty value
    pub fn require(&self, column: &str) -> Result<&str, ImportError> {
        match self.get(column) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ImportError::MissingValue {
                line: self.line,
                column: column.to_string(),
            }),
        }
    }
}

/// A parsed CSV file
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Read and parse a CSV file from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse CSV from any reader. Blank lines are skipped and short rows are
    /// allowed; cells beyond the header width are ignored.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ImportError> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input).map_err(csv::Error::from)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input.as_slice());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        let mut consumed = reader.position().byte();
        while reader.read_record(&mut record)? {
            // The reader's own line counter ignores skipped blank lines
            let line = line_at(&input, consumed);
            consumed = reader.position().byte();

            let fields = headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value.to_string()))
                .collect();
            rows.push(CsvRow { line, fields });
        }

        Ok(Self { headers, rows })
    }

    /// Check the header row against the columns an import needs.
    /// All missing columns are reported together.
    pub fn require_columns(&self, kind: ImportKind) -> Result<(), ImportError> {
        let missing: Vec<String> = kind
            .required_columns()
            .iter()
            .filter(|column| !self.headers.iter().any(|h| h == *column))
            .map(|column| column.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns {
                kind,
                columns: missing,
            })
        }
    }
}

/// 1-based line of the first non-blank byte at or after `offset`
fn line_at(input: &[u8], offset: u64) -> u64 {
    let offset = usize::try_from(offset).map_or(input.len(), |o| o.min(input.len()));
    let start = input[offset..]
        .iter()
        .position(|b| *b != b'\n' && *b != b'\r')
        .map_or(input.len(), |i| offset + i);
    let newlines = input[..start].iter().filter(|b| **b == b'\n').count();
    newlines as u64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rows_keyed_by_header() {
        let table = CsvTable::from_reader("sku,description,price\n123,Widget,9.99\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["sku", "description", "price"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("description"), Some("Widget"));
        assert_eq!(table.rows[0].get("price"), Some("9.99"));
        assert_eq!(table.rows[0].line(), 2);
    }

    #[test]
    fn test_values_are_trimmed_and_blank_lines_skipped() {
        let text = "name , phone\n  Ada , 555-0100 \n\nBob,555-0101\n";
        let table = CsvTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("name"), Some("Ada"));
        assert_eq!(table.rows[0].get("phone"), Some("555-0100"));
        assert_eq!(table.rows[1].line(), 4);
    }

    #[test]
    fn test_line_numbers_count_blank_and_crlf_lines() {
        let text = "sku,description,price\r\n\r\nA,B,1\r\n\r\n\r\nC,D,2\r\n";
        let table = CsvTable::from_reader(text.as_bytes()).unwrap();
        let lines: Vec<u64> = table.rows.iter().map(CsvRow::line).collect();
        assert_eq!(lines, vec![3, 6]);
    }

    #[test]
    fn test_quoted_newline_keeps_following_lines() {
        let text = "sku,description,price\nA,\"two\nlines\",1\nB,C,2\n";
        let table = CsvTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.rows[0].line(), 2);
        assert_eq!(table.rows[1].line(), 4);
    }

    #[test]
    fn test_short_row_has_missing_fields() {
        let table = CsvTable::from_reader("sku,description,price\nA1,Bolt\n".as_bytes()).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.get("price"), None);
        assert!(matches!(
            row.require("price"),
            Err(ImportError::MissingValue { line: 2, ref column }) if column == "price"
        ));
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let text = "sku,description,price\nA1,\"Bolt, zinc\",1\n";
        let table = CsvTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.rows[0].get("description"), Some("Bolt, zinc"));
    }

    #[test]
    fn test_require_columns_reports_every_missing_column() {
        let table = CsvTable::from_reader("name,phone\nAda,1\n".as_bytes()).unwrap();
        let err = table.require_columns(ImportKind::Customers).unwrap_err();
        match err {
            ImportError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["status".to_string(), "salesRep".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sku,description,price").unwrap();
        writeln!(file, "Z9,Zipper,0.5").unwrap();

        let table = CsvTable::from_path(file.path()).unwrap();
        assert_eq!(table.rows[0].get("sku"), Some("Z9"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = CsvTable::from_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
