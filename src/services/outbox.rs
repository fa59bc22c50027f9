//! Email outbox
//!
//! There is no mail transport. "Emailing" a quote renders its PDF and drops it,
//! with a plain-text message addressed to the customer, into an outbox
//! directory for someone to send by hand.

use super::pdf::{self, QuoteDocument};
use crate::error::ExportError;
use crate::model::quote::Quote;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files written for one queued quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxEntry {
    pub pdf_path: PathBuf,
    pub message_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Outbox {
    dir: PathBuf,
}

impl Outbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Queue a committed quote for `recipient`
    pub fn queue(
        &self,
        quote: &Quote,
        document: &QuoteDocument,
        recipient: &str,
    ) -> Result<OutboxEntry, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let stem = format!("quote-{}", quote.id);
        let pdf_path = self.dir.join(format!("{stem}.pdf"));
        let message_path = self.dir.join(format!("{stem}.txt"));

        pdf::write(document, &pdf_path)?;

        let message = format!(
            "To: {recipient}\n\
             Subject: {title}\n\
             Attachment: {attachment}\n\
             \n\
             Hello {name},\n\
             \n\
             Please find your quote attached.\n\
             {total}\n",
            title = document.title,
            attachment = pdf_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            name = quote.display_customer(),
            total = document.grand_total,
        );
        fs::write(&message_path, message).map_err(|source| ExportError::Write {
            path: message_path.clone(),
            source,
        })?;

        info!(%recipient, id = %quote.id, "queued quote in outbox");
        Ok(OutboxEntry {
            pdf_path,
            message_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::CatalogItem;
    use crate::model::quote::WorkingQuote;
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[test]
    fn test_queue_writes_pdf_and_message() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = Outbox::new(dir.path().join("outbox"));

        let mut working = WorkingQuote::new();
        working.add_item(&CatalogItem::new("123456", "Product A", Decimal::from(10)));
        working.set_customer_name("Acme");
        working.set_customer_email("buyer@acme.test");
        let quote = Quote::snapshot(&working, Utc::now());
        let doc = QuoteDocument::new("GVWS Sales Quote", "$", &quote.customer_name, &quote.line_items);

        let entry = outbox.queue(&quote, &doc, "buyer@acme.test").unwrap();

        assert!(fs::read(&entry.pdf_path).unwrap().starts_with(b"%PDF"));
        let message = fs::read_to_string(&entry.message_path).unwrap();
        assert!(message.starts_with("To: buyer@acme.test\n"));
        assert!(message.contains("Hello Acme,"));
        assert!(message.contains("Total: $10.00"));
        assert_eq!(entry.pdf_path.parent(), Some(outbox.dir()));
    }
}
