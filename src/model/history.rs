//! Quote history ledger
//!
//! Append-only, newest first. Every commit rewrites the whole history to the
//! backing store.

use super::quote::{Quote, QuoteId, WorkingQuote};
use crate::error::StoreError;
use crate::services::store::HistoryStore;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub struct QuoteLedger {
    quotes: Vec<Quote>,
    store: Box<dyn HistoryStore>,
    /// Error from the initial load, if history had to start empty
    load_error: Option<String>,
}

impl QuoteLedger {
    /// Load history from the store. If the store cannot be read the ledger
    /// starts empty and stays usable.
    pub fn open(store: Box<dyn HistoryStore>) -> Self {
        let (quotes, load_error) = match store.load() {
            Ok(quotes) => {
                info!(count = quotes.len(), "loaded quote history");
                (quotes, None)
            }
            Err(e) => {
                warn!(error = %e, "quote history unavailable, starting empty");
                (Vec::new(), Some(e.to_string()))
            }
        };

        Self {
            quotes,
            store,
            load_error,
        }
    }

    /// Why the history started empty, if it did
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Full history, newest first
    pub fn list(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Copy of a saved quote for reopening in the working quote
    pub fn load(&self, id: QuoteId) -> Option<Quote> {
        self.quotes.iter().find(|q| q.id == id).cloned()
    }

    /// Snapshot the working quote into history. An empty quote is ignored and
    /// `Ok(None)` returned.
    pub fn commit(&mut self, working: &WorkingQuote) -> Result<Option<Quote>, StoreError> {
        self.commit_at(working, Utc::now())
    }

    pub(crate) fn commit_at(
        &mut self,
        working: &WorkingQuote,
        now: DateTime<Utc>,
    ) -> Result<Option<Quote>, StoreError> {
        if working.is_empty() {
            return Ok(None);
        }

        let quote = Quote::snapshot(working, now);
        self.quotes.insert(0, quote.clone());

        if let Err(e) = self.store.save(&self.quotes) {
            self.quotes.remove(0);
            return Err(e);
        }

        // The store now holds a good copy even if the first read failed.
        self.load_error = None;

        info!(
            id = %quote.id,
            lines = quote.line_items.len(),
            total = %quote.total,
            "committed quote"
        );
        Ok(Some(quote))
    }

    /// Write the current history back to the store
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if self.load_error.is_some() && self.quotes.is_empty() {
            // Don't overwrite an unreadable file with nothing.
            return Ok(());
        }
        self.store.save(&self.quotes)
    }
}
