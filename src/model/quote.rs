//! Working quote and committed quote records

use super::catalog::CatalogItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A catalog item with a quantity. At most one per sku in a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub description: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl LineItem {
    fn from_catalog(item: &CatalogItem) -> Self {
        Self {
            sku: item.sku.clone(),
            description: item.description.clone(),
            unit_price: item.unit_price,
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Sum of quantity × unit price, unrounded
pub fn sum_lines(lines: &[LineItem]) -> Decimal {
    lines.iter().map(LineItem::line_total).sum()
}

/// Parse a quantity typed by the user. Anything that is not a positive
/// integer becomes 1.
pub fn parse_quantity(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|q| *q >= 1)
        .unwrap_or(1)
}

/// The quote currently being edited
#[derive(Debug, Clone, Default)]
pub struct WorkingQuote {
    lines: Vec<LineItem>,
    pub customer_name: String,
    pub customer_email: String,
    revision: u64,
}

impl WorkingQuote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, sku: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.sku == sku)
    }

    /// Bumped by every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add one unit of a catalog item. Existing lines keep their position.
    pub fn add_item(&mut self, item: &CatalogItem) {
        match self.lines.iter_mut().find(|l| l.sku == item.sku) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(LineItem::from_catalog(item)),
        }
        self.touch();
    }

    /// Overwrite the quantity of a line; zero is treated as 1.
    /// Returns false if no line has this sku.
    pub fn set_quantity(&mut self, sku: &str, quantity: u32) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.sku == sku) else {
            return false;
        };
        line.quantity = quantity.max(1);
        self.touch();
        true
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
        self.touch();
    }

    pub fn set_customer_email(&mut self, email: impl Into<String>) {
        self.customer_email = email.into();
        self.touch();
    }

    pub fn total(&self) -> Decimal {
        sum_lines(&self.lines)
    }

    /// Clear lines and customer fields
    pub fn reset(&mut self) {
        self.lines.clear();
        self.customer_name.clear();
        self.customer_email.clear();
        self.touch();
    }

    /// Replace the working quote with a copy of a saved quote
    pub fn load(&mut self, quote: &Quote) {
        self.lines = quote.line_items.clone();
        self.customer_name = quote.customer_name.clone();
        self.customer_email = quote.customer_email.clone();
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Identifier of a committed quote
///
/// New quotes get a time-ordered UUID. Histories written by the earlier
/// browser version used a millisecond timestamp, which is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteId {
    Uuid(Uuid),
    Legacy(u64),
}

impl QuoteId {
    pub fn generate() -> Self {
        QuoteId::Uuid(Uuid::now_v7())
    }
}

impl From<Uuid> for QuoteId {
    fn from(id: Uuid) -> Self {
        QuoteId::Uuid(id)
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteId::Uuid(id) => write!(f, "{id}"),
            QuoteId::Legacy(ms) => write!(f, "{ms}"),
        }
    }
}

/// A committed quote. Never modified after it is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(alias = "quoteItems")]
    pub line_items: Vec<LineItem>,
    pub total: Decimal,
}

impl Quote {
    /// Snapshot a working quote. The total is frozen here.
    pub fn snapshot(working: &WorkingQuote, created_at: DateTime<Utc>) -> Self {
        Self {
            id: QuoteId::generate(),
            created_at,
            customer_name: working.customer_name.clone(),
            customer_email: working.customer_email.clone(),
            line_items: working.lines.clone(),
            total: working.total(),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }

    /// Name for list display
    pub fn display_customer(&self) -> &str {
        if self.customer_name.trim().is_empty() {
            "(no customer)"
        } else {
            &self.customer_name
        }
    }
}
