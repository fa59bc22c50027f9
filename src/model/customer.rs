//! Customers imported from CSV
//!
//! Held in memory for the session only. A quote copies the customer's name as
//! free text; nothing links the two.

use crate::error::{ImportError, ImportKind};
use crate::services::csv_import::CsvTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub status: String,
    #[serde(rename = "salesRep")]
    pub sales_rep: String,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerBook {
    customers: Vec<Customer>,
}

impl CustomerBook {
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Customer> {
        self.customers.get(index)
    }

    /// Replace the customer list from a CSV. Values are stored verbatim, but
    /// every row must carry all four columns.
    pub fn replace_from_csv(&mut self, table: &CsvTable) -> Result<usize, ImportError> {
        table.require_columns(ImportKind::Customers)?;
        if table.rows.is_empty() {
            return Err(ImportError::NoRows {
                kind: ImportKind::Customers,
            });
        }

        let customers = table
            .rows
            .iter()
            .map(|row| {
                let field = |column: &str| {
                    row.get(column)
                        .map(str::to_string)
                        .ok_or_else(|| ImportError::MissingValue {
                            line: row.line(),
                            column: column.to_string(),
                        })
                };
                Ok(Customer {
                    name: field("name")?,
                    phone: field("phone")?,
                    status: field("status")?,
                    sales_rep: field("salesRep")?,
                })
            })
            .collect::<Result<Vec<_>, ImportError>>()?;

        let count = customers.len();
        self.customers = customers;
        Ok(count)
    }
}
