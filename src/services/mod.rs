//! External service interactions
//!
//! This module contains the adapters that touch the outside world:
//! - CSV parsing for catalog and customer imports
//! - The durable quote history store
//! - PDF rendering
//! - The email outbox

pub mod csv_import;
pub mod outbox;
pub mod pdf;
pub mod store;

pub use csv_import::CsvTable;
pub use outbox::{Outbox, OutboxEntry};
pub use pdf::QuoteDocument;
pub use store::{HistoryStore, JsonFileStore};
