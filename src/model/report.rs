//! Reports derived from quote history

use super::quote::Quote;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Quote totals for one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTotal {
    pub date: NaiveDate,
    pub total: Decimal,
    pub count: usize,
}

/// Sum the stored totals per UTC calendar date.
///
/// Dates appear in the order they are first met while walking `history`,
/// so a newest-first history yields newest dates first. Totals are the frozen
/// `total` fields, not recomputed from line items.
pub fn totals_by_date(history: &[Quote]) -> Vec<DateTotal> {
    let mut groups: Vec<DateTotal> = Vec::new();

    for quote in history {
        let date = quote.created_at.date_naive();
        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => {
                group.total += quote.total;
                group.count += 1;
            }
            None => groups.push(DateTotal {
                date,
                total: quote.total,
                count: 1,
            }),
        }
    }

    groups
}

/// Sum of every stored quote total
pub fn grand_total(history: &[Quote]) -> Decimal {
    history.iter().map(|q| q.total).sum()
}
