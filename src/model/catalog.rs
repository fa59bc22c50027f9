//! Product catalog
//!
//! The catalog is only ever replaced as a whole: either the built-in seed
//! items or the rows of an imported items CSV.

use crate::error::{ImportError, ImportKind};
use crate::services::csv_import::CsvTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// A purchasable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub sku: String,
    pub description: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
}

impl CatalogItem {
    pub fn new(sku: impl Into<String>, description: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            sku: sku.into(),
            description: description.into(),
            unit_price,
        }
    }

    /// Case-insensitive substring match on sku or description.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.sku.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// The current set of catalog items, in import order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Catalog shown before any import
    pub fn seed() -> Self {
        Self {
            items: vec![
                CatalogItem::new("123456", "Product A", Decimal::from(10)),
                CatalogItem::new("234567", "Product B", Decimal::from(20)),
            ],
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, sku: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.sku == sku)
    }

    /// Filter by sku or description. The returned view is lazy and can be
    /// cloned to iterate again from the start.
    pub fn search(&self, term: &str) -> CatalogSearch<'_> {
        CatalogSearch {
            items: self.items.iter(),
            needle: term.trim().to_lowercase(),
        }
    }

    /// Replace the whole catalog with already-validated items
    pub fn replace(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
    }

    /// Validate every row of an items CSV and, only if all rows pass,
    /// replace the catalog. Returns the number of imported items.
    pub fn replace_from_csv(&mut self, table: &CsvTable) -> Result<usize, ImportError> {
        table.require_columns(ImportKind::Items)?;
        if table.rows.is_empty() {
            return Err(ImportError::NoRows {
                kind: ImportKind::Items,
            });
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(table.rows.len());

        for row in &table.rows {
            let sku = row.require("sku")?;
            let description = row.require("description")?;
            let raw_price = row.require("price")?;

            let unit_price = parse_price(raw_price).ok_or_else(|| ImportError::InvalidPrice {
                line: row.line(),
                value: raw_price.to_string(),
            })?;

            if !seen.insert(sku.to_string()) {
                return Err(ImportError::DuplicateSku {
                    line: row.line(),
                    sku: sku.to_string(),
                });
            }

            items.push(CatalogItem::new(sku, description, unit_price));
        }

        let count = items.len();
        self.replace(items);
        Ok(count)
    }
}

/// Parse a price cell. Accepts an optional leading `$` and thousands
/// separators; rejects anything else that is not a non-negative decimal.
fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let price = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;

    if price.is_sign_negative() && !price.is_zero() {
        None
    } else {
        Some(price)
    }
}

/// Lazy, restartable search over the catalog
#[derive(Debug, Clone)]
pub struct CatalogSearch<'a> {
    items: std::slice::Iter<'a, CatalogItem>,
    needle: String,
}

impl<'a> Iterator for CatalogSearch<'a> {
    type Item = &'a CatalogItem;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.items.by_ref().find(|item| item.matches(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> CsvTable {
        CsvTable::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_seed_catalog() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("123456").unwrap().description, "Product A");
        assert_eq!(catalog.get("234567").unwrap().unit_price, Decimal::from(20));
    }

    #[test]
    fn test_search_empty_term_returns_everything_in_order() {
        let catalog = Catalog::seed();
        let skus: Vec<&str> = catalog.search("").map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["123456", "234567"]);
    }

    #[test]
    fn test_search_matches_sku_or_description_case_insensitive() {
        let catalog = Catalog::seed();
        let by_desc: Vec<&str> = catalog.search("product b").map(|i| i.sku.as_str()).collect();
        assert_eq!(by_desc, vec!["234567"]);

        let by_sku: Vec<&str> = catalog.search("1234").map(|i| i.sku.as_str()).collect();
        assert_eq!(by_sku, vec!["123456"]);

        let shared: Vec<&str> = catalog.search("3456").map(|i| i.sku.as_str()).collect();
        assert_eq!(shared, vec!["123456", "234567"]);

        assert_eq!(catalog.search("widget").count(), 0);
    }

    #[test]
    fn test_search_is_restartable() {
        let catalog = Catalog::seed();
        let search = catalog.search("PRODUCT");
        let first: Vec<_> = search.clone().collect();
        let second: Vec<_> = search.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_replace_from_csv_replaces_whole_catalog() {
        let mut catalog = Catalog::seed();
        let csv = table("sku,description,price\nA1,Anchor bolt,1.25\nB2,Bracket,$4\n");

        let count = catalog.replace_from_csv(&csv).unwrap();

        assert_eq!(count, 2);
        assert!(catalog.get("123456").is_none());
        assert_eq!(catalog.get("A1").unwrap().unit_price, Decimal::from_str("1.25").unwrap());
        assert_eq!(catalog.get("B2").unwrap().unit_price, Decimal::from(4));
        let skus: Vec<&str> = catalog.items().iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["A1", "B2"]);
    }

    #[test]
    fn test_missing_price_column_keeps_catalog() {
        let mut catalog = Catalog::seed();
        let csv = table("sku,description\nA1,Anchor bolt\n");

        let err = catalog.replace_from_csv(&csv).unwrap_err();

        assert!(matches!(err, ImportError::MissingColumns { ref columns, .. } if columns == &vec!["price".to_string()]));
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("123456").is_some());
    }

    #[test]
    fn test_bad_trailing_row_rejects_whole_import() {
        let mut catalog = Catalog::seed();
        let csv = table("sku,description,price\nA1,Anchor bolt,1.25\nB2,Bracket,abc\n");

        let err = catalog.replace_from_csv(&csv).unwrap_err();

        assert!(matches!(err, ImportError::InvalidPrice { line: 3, .. }));
        assert!(catalog.get("A1").is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_error_names_physical_line_after_blank_line() {
        let mut catalog = Catalog::seed();
        let csv = table("sku,description,price\nA,B,1\n\nC,D,abc\n");

        let err = catalog.replace_from_csv(&csv).unwrap_err();

        assert!(matches!(err, ImportError::InvalidPrice { line: 4, .. }));
        assert!(err.to_string().starts_with("Line 4:"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut catalog = Catalog::default();
        let csv = table("sku,description,price\nA1,Refund,-3\n");
        assert!(matches!(
            catalog.replace_from_csv(&csv),
            Err(ImportError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_duplicate_sku_rejected() {
        let mut catalog = Catalog::default();
        let csv = table("sku,description,price\nA1,One,1\nA1,Again,2\n");
        assert!(matches!(
            catalog.replace_from_csv(&csv),
            Err(ImportError::DuplicateSku { line: 3, .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_header_only_file_rejected() {
        let mut catalog = Catalog::seed();
        let csv = table("sku,description,price\n");
        assert!(matches!(
            catalog.replace_from_csv(&csv),
            Err(ImportError::NoRows { .. })
        ));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("10"), Some(Decimal::from(10)));
        assert_eq!(parse_price(" $1,250.50 "), Some(Decimal::from_str("1250.50").unwrap()));
        assert_eq!(parse_price("0"), Some(Decimal::ZERO));
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-1"), None);
    }
}
