//! Durable quote history store
//!
//! The whole history lives in one JSON document and is replaced wholesale on
//! every save.

use crate::error::StoreError;
use crate::model::quote::Quote;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Somewhere the quote history can be read from and written to
pub trait HistoryStore {
    /// Read the full history, newest first. A store that has never been
    /// written returns an empty history.
    fn load(&self) -> Result<Vec<Quote>, StoreError>;

    /// Replace the stored history with `quotes`
    fn save(&mut self, quotes: &[Quote]) -> Result<(), StoreError>;
}

#[derive(Serialize)]
struct HistoryFileRef<'a> {
    version: u32,
    quotes: &'a [Quote],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    Versioned { version: u32, quotes: Vec<Quote> },
    Unversioned(Vec<Quote>),
}

/// History kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Quote>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: HistoryFile =
            serde_json::from_str(&contents).map_err(|source| StoreError::Corrupted {
                path: self.path.clone(),
                source,
            })?;

        match file {
            HistoryFile::Versioned { version, .. } if version > SCHEMA_VERSION => {
                Err(StoreError::UnsupportedVersion { found: version })
            }
            HistoryFile::Versioned { quotes, .. } | HistoryFile::Unversioned(quotes) => Ok(quotes),
        }
    }

    fn save(&mut self, quotes: &[Quote]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_string_pretty(&HistoryFileRef {
            version: SCHEMA_VERSION,
            quotes,
        })
        .map_err(StoreError::Serialize)?;

        // Write beside the target and rename over it so readers never see a
        // half-written file.
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        Ok(())
    }
}

/// History kept only in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub quotes: Vec<Quote>,
    pub fail_saves: bool,
    pub save_count: usize,
}

#[cfg(test)]
impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<Quote>, StoreError> {
        Ok(self.quotes.clone())
    }

    fn save(&mut self, quotes: &[Quote]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Io {
                path: PathBuf::from("memory"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        self.quotes = quotes.to_vec();
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::CatalogItem;
    use crate::model::quote::{QuoteId, WorkingQuote};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn sample_quote(name: &str) -> Quote {
        let mut working = WorkingQuote::new();
        working.add_item(&CatalogItem::new("123456", "Product A", Decimal::from(10)));
        working.set_customer_name(name);
        Quote::snapshot(&working, Utc.with_ymd_and_hms(2024, 3, 9, 15, 30, 0).unwrap())
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("quotes.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("quotes.json"));
        let quotes = vec![sample_quote("Second"), sample_quote("First")];

        store.save(&quotes).unwrap();
        let loaded = JsonFileStore::new(store.path()).load().unwrap();

        assert_eq!(loaded, quotes);
    }

    #[test]
    fn test_saved_file_carries_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("quotes.json"));
        store.save(&[sample_quote("Acme")]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["quotes"][0]["customerName"], "Acme");
    }

    #[test]
    fn test_unversioned_array_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        let quote = sample_quote("Legacy");
        fs::write(&path, serde_json::to_string(&vec![quote.clone()]).unwrap()).unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(loaded, vec![quote]);
    }

    #[test]
    fn test_browser_history_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        fs::write(
            &path,
            r#"[{"id":1714557600000,"date":"2024-05-01T10:00:00.000Z","customerName":"Acme","customerEmail":"","quoteItems":[{"sku":"123456","description":"Product A","price":10,"qty":2}],"total":20}]"#,
        )
        .unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, QuoteId::Legacy(1714557600000));
        assert_eq!(loaded[0].customer_name, "Acme");
        assert_eq!(loaded[0].line_items[0].quantity, 2);
        assert_eq!(loaded[0].total, Decimal::from(20));

        // Rewriting keeps the old id and upgrades the envelope
        let mut store = JsonFileStore::new(&path);
        store.save(&loaded).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["quotes"][0]["id"], 1714557600000u64);
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), loaded);
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        fs::write(&path, r#"{"version": 99, "quotes": []}"#).unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion { found: 99 }));
    }
}
