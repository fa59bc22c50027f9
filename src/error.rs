//! Error types for the quote ledger
//!
//! Every error here is recovered at the point of the user action and shown on
//! the status line. None of them end the session.

use std::path::PathBuf;
use thiserror::Error;

/// Which kind of CSV file an import was reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Items,
    Customers,
}

impl ImportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ImportKind::Items => "items",
            ImportKind::Customers => "customers",
        }
    }

    /// Columns the header row must contain
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            ImportKind::Items => &["sku", "description", "price"],
            ImportKind::Customers => &["name", "phone", "status", "salesRep"],
        }
    }
}

/// Import validation failures. The previous catalog/customer list is kept.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid {} file. Missing column(s): {}", .kind.label(), .columns.join(", "))]
    MissingColumns {
        kind: ImportKind,
        columns: Vec<String>,
    },

    #[error("Line {line}: missing value for '{column}'")]
    MissingValue { line: u64, column: String },

    #[error("Line {line}: price '{value}' is not a valid non-negative amount")]
    InvalidPrice { line: u64, value: String },

    #[error("Line {line}: duplicate sku '{sku}'")]
    DuplicateSku { line: u64, sku: String },

    #[error("The {} file has no data rows", .kind.label())]
    NoRows { kind: ImportKind },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Durable store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Quote history at {} is corrupted: {source}", .path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize quote history: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Quote history was written by a newer version (schema {found})")]
    UnsupportedVersion { found: u32 },
}

/// PDF rendering and file output failures
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to render PDF: {0}")]
    Render(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by quote-level actions (commit, export, email)
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Please enter an email address.")]
    MissingRecipient,

    #[error("The quote has no line items")]
    EmptyQuote,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
