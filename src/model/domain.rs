//! Domain state - business/data state separate from UI concerns

use super::catalog::Catalog;
use super::customer::CustomerBook;
use super::history::QuoteLedger;
use super::quote::WorkingQuote;

/// Domain state containing all business data
pub struct DomainState {
    /// Items that can be added to a quote
    pub catalog: Catalog,

    /// Customers from the last customers import
    pub customers: CustomerBook,

    /// The quote being edited
    pub quote: WorkingQuote,

    /// Committed quotes, newest first
    pub ledger: QuoteLedger,
}

impl DomainState {
    /// Start with the seed catalog, no customers and an empty quote
    pub fn new(ledger: QuoteLedger) -> Self {
        Self {
            catalog: Catalog::seed(),
            customers: CustomerBook::default(),
            quote: WorkingQuote::new(),
            ledger,
        }
    }
}
