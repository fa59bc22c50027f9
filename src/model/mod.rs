//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - Business data (catalog, customers, working quote, history)
//! - `ModalStack` - Modal overlay management
//! - `Focus` / `CustomerField` - Presentation state shared with components

pub mod catalog;
pub mod customer;
pub mod domain;
pub mod history;
pub mod modal;
pub mod money;
pub mod quote;
pub mod report;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogItem};
pub use customer::{Customer, CustomerBook};
pub use history::QuoteLedger;
pub use quote::{LineItem, Quote, QuoteId, WorkingQuote};
pub use report::DateTotal;
