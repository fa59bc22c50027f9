//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Quote rules live in the model; App wires user actions to them and turns
//! the outcome into a status line.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, CustomersDialog, HelpDialog, HistoryDialog, HomeComponent,
    HomeRenderContext, InputDialog, Prompt, QuitDialog, ReportDialog,
};
use crate::config::Config;
use crate::error::{ImportError, ImportKind, QuoteError};
use crate::model::domain::DomainState;
use crate::model::history::QuoteLedger;
use crate::model::modal::{Modal, ModalStack};
use crate::model::quote::{parse_quantity, Quote};
use crate::model::report::{grand_total, totals_by_date};
use crate::model::ui::CustomerField;
use crate::services::pdf::{self, QuoteDocument};
use crate::services::{CsvTable, JsonFileStore, Outbox, OutboxEntry};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const HISTORY_FILE: &str = "quotes.json";
const OUTBOX_DIR: &str = "outbox";

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Where emailed quotes are dropped
    pub outbox: Outbox,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Committed quote whose export has not succeeded yet, keyed by the
    /// working quote revision it was taken from
    unexported: Option<(u64, Quote)>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub history_dialog: HistoryDialog,
    pub report_dialog: ReportDialog,
    pub customers_dialog: CustomersDialog,
    pub input_dialog: InputDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Open the quote history and outbox under `home`
    pub fn new(config: Config, home: &Path) -> App {
        let store = JsonFileStore::new(home.join(HISTORY_FILE));
        let ledger = QuoteLedger::open(Box::new(store));
        Self::with_parts(config, ledger, Outbox::new(home.join(OUTBOX_DIR)))
    }

    pub fn with_parts(config: Config, ledger: QuoteLedger, outbox: Outbox) -> App {
        let error = ledger
            .load_error()
            .map(|e| format!("Quote history unavailable, starting empty ({})", e));

        App {
            config,
            domain: DomainState::new(ledger),
            modals: ModalStack::new(),
            outbox,
            should_quit: false,
            error,
            status_message: None,
            unexported: None,
            home: HomeComponent::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
            history_dialog: HistoryDialog::default(),
            report_dialog: ReportDialog::default(),
            customers_dialog: CustomersDialog::default(),
            input_dialog: InputDialog,
        }
    }

    /// Write history back to disk on the way out
    pub fn shutdown(&mut self) {
        if let Err(e) = self.domain.ledger.flush() {
            warn!(error = %e, "failed to flush quote history");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Import
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the catalog or customer list from a CSV file. On failure the
    /// previous data is kept and the error shown.
    pub fn import_csv(&mut self, kind: ImportKind, path: &Path) {
        match self.try_import(kind, path) {
            Ok(count) => {
                info!(kind = kind.label(), count, path = %path.display(), "imported csv");
                self.error = None;
                self.status_message = Some(format!(
                    "Imported {} {} from {}",
                    count,
                    kind.label(),
                    path.display()
                ));
            }
            Err(e) => {
                warn!(kind = kind.label(), path = %path.display(), error = %e, "import rejected");
                self.error = Some(e.to_string());
            }
        }
    }

    fn try_import(&mut self, kind: ImportKind, path: &Path) -> Result<usize, ImportError> {
        let table = CsvTable::from_path(path)?;
        let count = match kind {
            ImportKind::Items => self.domain.catalog.replace_from_csv(&table)?,
            ImportKind::Customers => self.domain.customers.replace_from_csv(&table)?,
        };
        self.home
            .clamp_selection(&self.domain.catalog, &self.domain.quote);
        Ok(count)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commit / Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Save the working quote to history. The working quote is kept until
    /// its export succeeds; retrying an unchanged quote reuses the record.
    fn commit_working(&mut self) -> Result<Quote, QuoteError> {
        let revision = self.domain.quote.revision();
        if let Some((_, quote)) = self.unexported.as_ref().filter(|(rev, _)| *rev == revision) {
            debug!(id = %quote.id, "retrying export of committed quote");
            return Ok(quote.clone());
        }

        let quote = self
            .domain
            .ledger
            .commit(&self.domain.quote)?
            .ok_or(QuoteError::EmptyQuote)?;
        self.unexported = Some((revision, quote.clone()));
        Ok(quote)
    }

    /// Start a fresh quote once the committed one has been exported
    fn finish_export(&mut self) {
        self.unexported = None;
        self.domain.quote.reset();
        self.home
            .clamp_selection(&self.domain.catalog, &self.domain.quote);
    }

    fn document_for(&self, quote: &Quote) -> QuoteDocument {
        QuoteDocument::new(
            &self.config.quote_title,
            &self.config.currency_symbol,
            &quote.customer_name,
            &quote.line_items,
        )
    }

    /// Commit the quote, then write its PDF to the configured export path
    pub fn export_pdf(&mut self) -> Result<PathBuf, QuoteError> {
        let quote = self.commit_working()?;
        let path = self.config.pdf_path();
        pdf::write(&self.document_for(&quote), &path)?;
        self.finish_export();
        Ok(path)
    }

    /// Commit the quote and drop it in the outbox addressed to the customer
    pub fn email_quote(&mut self) -> Result<OutboxEntry, QuoteError> {
        let recipient = self.domain.quote.customer_email.trim().to_string();
        if recipient.is_empty() {
            return Err(QuoteError::MissingRecipient);
        }
        let quote = self.commit_working()?;
        let entry = self
            .outbox
            .queue(&quote, &self.document_for(&quote), &recipient)?;
        self.finish_export();
        Ok(entry)
    }

    /// Show the result of a quote action. An empty quote is silently ignored.
    fn report_outcome<T>(&mut self, result: Result<T, QuoteError>, message: impl FnOnce(T) -> String) {
        match result {
            Ok(value) => {
                self.error = None;
                self.status_message = Some(message(value));
            }
            Err(QuoteError::EmptyQuote) => {
                debug!("ignoring action on empty quote");
            }
            Err(e) => {
                warn!(error = %e, "quote action failed");
                self.error = Some(e.to_string());
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modal confirmations
    // ─────────────────────────────────────────────────────────────────────────

    fn load_from_history(&mut self, index: usize) {
        let Some(id) = self.domain.ledger.list().get(index).map(|q| q.id) else {
            return;
        };
        if let Some(quote) = self.domain.ledger.load(id) {
            self.domain.quote.load(&quote);
            self.home
                .clamp_selection(&self.domain.catalog, &self.domain.quote);
            self.status_message = Some(format!(
                "Loaded quote for {} from {}",
                quote.display_customer(),
                quote.created_at.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    fn confirm_modal(&mut self, modal: Modal) {
        match modal {
            Modal::QuitConfirm => {
                self.should_quit = true;
            }
            Modal::History { .. } => {
                self.modals.pop();
                self.load_from_history(self.history_dialog.selected_index);
            }
            Modal::Customers { .. } => {
                self.modals.pop();
                let index = self.customers_dialog.selected_index;
                if let Some(customer) = self.domain.customers.get(index) {
                    let name = customer.name.clone();
                    self.status_message = Some(format!("Customer set to {}", name));
                    self.domain.quote.set_customer_name(name);
                }
            }
            Modal::Import { kind, path } => {
                self.modals.pop();
                let path = path.trim();
                if !path.is_empty() {
                    self.import_csv(kind, Path::new(path));
                }
            }
            Modal::EditQuantity { sku, input } => {
                self.modals.pop();
                self.domain.quote.set_quantity(&sku, parse_quantity(&input));
            }
            Modal::EditCustomer { field, input } => {
                self.modals.pop();
                match field {
                    CustomerField::Name => self.domain.quote.set_customer_name(input.trim()),
                    CustomerField::Email => self.domain.quote.set_customer_email(input.trim()),
                }
            }
            Modal::Report { .. } | Modal::Help { .. } => {
                self.modals.pop();
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else if self.home.search_mode {
            self.handle_search_key_event(key)
        } else {
            // A fresh key press on the main screen dismisses the last message
            self.error = None;
            self.status_message = None;
            self.home.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => self.should_quit = true,

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.home.next(&self.domain.catalog, &self.domain.quote),
            Action::PrevItem => self.home.previous(&self.domain.catalog, &self.domain.quote),
            Action::FirstItem => self.home.select_first(&self.domain.catalog, &self.domain.quote),
            Action::LastItem => self.home.select_last(&self.domain.catalog, &self.domain.quote),
            Action::SwitchFocus => self.home.switch_focus(&self.domain.catalog, &self.domain.quote),

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.enter_search_mode(),
            Action::ExitSearchMode => self.home.exit_search_mode(),
            Action::SearchInput(c) => self.home.search_input(c, &self.domain.catalog),
            Action::SearchBackspace => self.home.search_backspace(&self.domain.catalog),

            // ─────────────────────────────────────────────────────────────────
            // Working Quote
            // ─────────────────────────────────────────────────────────────────
            Action::AddSelectedItem => {
                if let Some(item) = self.home.selected_catalog_item(&self.domain.catalog).cloned() {
                    self.domain.quote.add_item(&item);
                    self.home
                        .clamp_selection(&self.domain.catalog, &self.domain.quote);
                    let quantity = self
                        .domain
                        .quote
                        .line(&item.sku)
                        .map(|l| l.quantity)
                        .unwrap_or(0);
                    self.status_message =
                        Some(format!("Added {} ({} on quote)", item.description, quantity));
                }
            }
            Action::EditSelectedQuantity => {
                match self.home.selected_line(&self.domain.quote) {
                    Some(line) => {
                        let modal = Modal::EditQuantity {
                            sku: line.sku.clone(),
                            input: line.quantity.to_string(),
                        };
                        self.modals.push(modal);
                    }
                    None if !self.domain.quote.is_empty() => {
                        self.status_message =
                            Some("Press Tab and pick a quote line first".to_string());
                    }
                    None => {}
                }
            }
            Action::EditCustomer(field) => {
                let input = match field {
                    CustomerField::Name => self.domain.quote.customer_name.clone(),
                    CustomerField::Email => self.domain.quote.customer_email.clone(),
                };
                self.modals.push(Modal::EditCustomer { field, input });
            }
            Action::DiscardQuote => {
                if !self.domain.quote.is_empty() {
                    self.status_message = Some("Working quote discarded".to_string());
                }
                self.domain.quote.reset();
                self.home
                    .clamp_selection(&self.domain.catalog, &self.domain.quote);
            }

            // ─────────────────────────────────────────────────────────────────
            // Import / Export
            // ─────────────────────────────────────────────────────────────────
            Action::OpenImport(kind) => {
                self.modals.push(Modal::Import {
                    kind,
                    path: String::new(),
                });
            }
            Action::ExportPdf => {
                let result = self.export_pdf();
                self.report_outcome(result, |path| {
                    format!("Quote saved. PDF written to {}", path.display())
                });
            }
            Action::EmailQuote => {
                let result = self.email_quote();
                self.report_outcome(result, |entry| {
                    format!(
                        "Quote saved. No mail is sent: message queued in outbox as {}",
                        entry.message_path.display()
                    )
                });
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.unsaved_lines = self.domain.quote.lines().len();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHistory => {
                self.history_dialog.reset();
                self.modals.push(Modal::History { selected_index: 0 });
            }
            Action::OpenReport => {
                self.report_dialog.scroll_offset = 0;
                self.modals.push(Modal::Report { scroll_offset: 0 });
            }
            Action::OpenCustomers => {
                self.customers_dialog.selected_index = 0;
                self.modals.push(Modal::Customers { selected_index: 0 });
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.confirm_modal(modal);
                }
            }
            Action::ModalUp => match self.modals.top_mut() {
                Some(Modal::History { selected_index }) => {
                    self.history_dialog.update(Action::ModalUp)?;
                    *selected_index = self.history_dialog.selected_index;
                }
                Some(Modal::Customers { selected_index }) => {
                    self.customers_dialog.update(Action::ModalUp)?;
                    *selected_index = self.customers_dialog.selected_index;
                }
                _ => {}
            },
            Action::ModalDown => match self.modals.top_mut() {
                Some(Modal::History { selected_index }) => {
                    // Clamp before incrementing
                    let max = self.domain.ledger.len().saturating_sub(1);
                    if self.history_dialog.selected_index < max {
                        self.history_dialog.update(Action::ModalDown)?;
                    }
                    *selected_index = self.history_dialog.selected_index;
                }
                Some(Modal::Customers { selected_index }) => {
                    let max = self.domain.customers.len().saturating_sub(1);
                    if self.customers_dialog.selected_index < max {
                        self.customers_dialog.update(Action::ModalDown)?;
                    }
                    *selected_index = self.customers_dialog.selected_index;
                }
                _ => {}
            },
            Action::InputChar(c) => {
                if let Some(input) = self.modals.top_mut().and_then(Modal::input_mut) {
                    input.push(c);
                }
            }
            Action::InputBackspace => {
                if let Some(input) = self.modals.top_mut().and_then(Modal::input_mut) {
                    input.pop();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (delegate to the open dialog)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                match self.modals.top_mut() {
                    Some(Modal::Help { scroll_offset }) => {
                        self.help_dialog.update(action)?;
                        *scroll_offset = self.help_dialog.scroll_offset;
                    }
                    Some(Modal::Report { scroll_offset }) => {
                        self.report_dialog.update(action)?;
                        *scroll_offset = self.report_dialog.scroll_offset;
                    }
                    Some(Modal::History { .. }) => {
                        self.history_dialog.update(action)?;
                    }
                    _ => {}
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            catalog: &self.domain.catalog,
            quote: &self.domain.quote,
            currency: &self.config.currency_symbol,
            history_len: self.domain.ledger.len(),
            customers_len: self.domain.customers.len(),
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };
        draw_home_screen(frame, area, &mut self.home, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::History { .. } => self.history_dialog.handle_key_event(key),
            Modal::Report { .. } => self.report_dialog.handle_key_event(key),
            Modal::Customers { .. } => self.customers_dialog.handle_key_event(key),
            Modal::Help { .. } => self.help_dialog.handle_key_event(key),
            Modal::Import { .. } | Modal::EditQuantity { .. } | Modal::EditCustomer { .. } => {
                self.input_dialog.handle_key_event(key)
            }
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        let currency = self.config.currency_symbol.as_str();
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            Modal::History { .. } => {
                self.history_dialog
                    .draw_with_history(frame, area, self.domain.ledger.list(), currency)?;
            }
            Modal::Report { .. } => {
                let history = self.domain.ledger.list();
                let groups = totals_by_date(history);
                self.report_dialog.draw_with_report(
                    frame,
                    area,
                    &groups,
                    grand_total(history),
                    currency,
                )?;
            }
            Modal::Customers { .. } => {
                self.customers_dialog
                    .draw_with_customers(frame, area, self.domain.customers.customers())?;
            }
            Modal::Import { kind, path } => {
                let title = match kind {
                    ImportKind::Items => "Import Items",
                    ImportKind::Customers => "Import Customers",
                };
                let hint = format!("Columns: {}", kind.required_columns().join(", "));
                self.input_dialog.draw_prompt(
                    frame,
                    area,
                    &Prompt {
                        title,
                        label: "Path to CSV file:",
                        value: path,
                        hint: Some(&hint),
                    },
                )?;
            }
            Modal::EditQuantity { sku, input } => {
                let label = format!("New quantity for {}:", sku);
                self.input_dialog.draw_prompt(
                    frame,
                    area,
                    &Prompt {
                        title: "Quantity",
                        label: &label,
                        value: input,
                        hint: Some("Anything other than a whole number above zero becomes 1"),
                    },
                )?;
            }
            Modal::EditCustomer { field, input } => {
                self.input_dialog.draw_prompt(
                    frame,
                    area,
                    &Prompt {
                        title: field.label(),
                        label: "Enter value:",
                        value: input,
                        hint: None,
                    },
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;
    use rust_decimal::Decimal;
    use std::fs;

    fn test_app(dir: &Path) -> App {
        let config = Config {
            export_dir: dir.join("exports"),
            ..Config::default()
        };
        let ledger = QuoteLedger::open(Box::new(MemoryStore::default()));
        App::with_parts(config, ledger, Outbox::new(dir.join("outbox")))
    }

    fn run(app: &mut App, action: Action) {
        let mut next = Some(action);
        while let Some(a) = next {
            next = app.update(a).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            run(app, Action::InputChar(c));
        }
    }

    fn set_customer(app: &mut App, field: CustomerField, value: &str) {
        run(app, Action::EditCustomer(field));
        type_text(app, value);
        run(app, Action::ConfirmModal);
    }

    fn import(app: &mut App, kind: ImportKind, path: &Path) {
        run(app, Action::OpenImport(kind));
        type_text(app, &path.display().to_string());
        run(app, Action::ConfirmModal);
    }

    #[test]
    fn test_add_same_item_twice() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::AddSelectedItem);
        run(&mut app, Action::AddSelectedItem);

        assert_eq!(app.domain.quote.lines().len(), 1);
        assert_eq!(app.domain.quote.lines()[0].quantity, 2);
        assert_eq!(app.domain.quote.total(), Decimal::from(20));
    }

    #[test]
    fn test_export_empty_quote_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::ExportPdf);

        assert!(app.domain.ledger.is_empty());
        assert!(app.error.is_none());
        assert!(app.status_message.is_none());
        assert!(!app.config.pdf_path().exists());
    }

    #[test]
    fn test_export_commits_and_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::AddSelectedItem);
        set_customer(&mut app, CustomerField::Name, "Acme");
        run(&mut app, Action::ExportPdf);

        assert_eq!(app.domain.ledger.len(), 1);
        assert_eq!(app.domain.ledger.list()[0].customer_name, "Acme");
        assert_eq!(app.domain.ledger.list()[0].total, Decimal::from(10));
        assert!(fs::read(app.config.pdf_path()).unwrap().starts_with(b"%PDF"));
        assert!(app.domain.quote.is_empty());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_email_requires_recipient() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::AddSelectedItem);
        run(&mut app, Action::EmailQuote);

        assert_eq!(app.error.as_deref(), Some("Please enter an email address."));
        assert!(app.domain.ledger.is_empty());
        assert_eq!(app.domain.quote.lines().len(), 1);
    }

    #[test]
    fn test_email_queues_in_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::AddSelectedItem);
        set_customer(&mut app, CustomerField::Email, "buyer@acme.test");
        run(&mut app, Action::EmailQuote);

        assert_eq!(app.domain.ledger.len(), 1);
        let queued = fs::read_dir(app.outbox.dir()).unwrap().count();
        assert_eq!(queued, 2);
        assert!(app.status_message.as_deref().unwrap().contains("outbox"));
    }

    #[test]
    fn test_email_with_empty_quote_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        set_customer(&mut app, CustomerField::Email, "buyer@acme.test");
        run(&mut app, Action::EmailQuote);

        assert!(app.error.is_none());
        assert!(app.domain.ledger.is_empty());
        assert!(!app.outbox.dir().exists());
    }

    #[test]
    fn test_import_without_price_column_keeps_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("items.csv");
        fs::write(&csv, "sku,description\n999,Thing\n").unwrap();
        let mut app = test_app(dir.path());

        import(&mut app, ImportKind::Items, &csv);

        assert_eq!(app.domain.catalog.len(), 2);
        assert!(app.domain.catalog.get("999").is_none());
        assert!(app.error.as_deref().unwrap().contains("price"));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_import_items_replaces_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("items.csv");
        fs::write(&csv, "sku,description,price\n999,Thing,4.50\n998,Other,1\n").unwrap();
        let mut app = test_app(dir.path());

        import(&mut app, ImportKind::Items, &csv);

        assert_eq!(app.domain.catalog.len(), 2);
        assert!(app.domain.catalog.get("123456").is_none());
        assert_eq!(
            app.domain.catalog.get("999").unwrap().unit_price,
            Decimal::new(450, 2)
        );
        assert!(app.error.is_none());
    }

    #[test]
    fn test_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        app.import_csv(ImportKind::Customers, &dir.path().join("nope.csv"));

        assert!(app.error.is_some());
        assert!(app.domain.customers.is_empty());
    }

    #[test]
    fn test_customers_dialog_copies_name() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("customers.csv");
        fs::write(
            &csv,
            "name,phone,status,salesRep\nAcme,555-0100,active,Dana\nGlobex,555-0199,lead,Sam\n",
        )
        .unwrap();
        let mut app = test_app(dir.path());
        import(&mut app, ImportKind::Customers, &csv);

        run(&mut app, Action::OpenCustomers);
        run(&mut app, Action::ModalDown);
        run(&mut app, Action::ModalDown);
        run(&mut app, Action::ConfirmModal);

        assert_eq!(app.domain.quote.customer_name, "Globex");
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_edit_quantity_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        run(&mut app, Action::AddSelectedItem);
        run(&mut app, Action::SwitchFocus);

        run(&mut app, Action::EditSelectedQuantity);
        run(&mut app, Action::InputBackspace);
        type_text(&mut app, "5");
        run(&mut app, Action::ConfirmModal);
        assert_eq!(app.domain.quote.lines()[0].quantity, 5);
        assert_eq!(app.domain.quote.total(), Decimal::from(50));

        run(&mut app, Action::EditSelectedQuantity);
        type_text(&mut app, "x");
        run(&mut app, Action::ConfirmModal);
        assert_eq!(app.domain.quote.lines()[0].quantity, 1);
    }

    #[test]
    fn test_cancelled_prompt_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::EditCustomer(CustomerField::Name));
        type_text(&mut app, "Nobody");
        run(&mut app, Action::CloseModal);

        assert!(app.domain.quote.customer_name.is_empty());
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_history_entry_reloads_into_working_quote() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::AddSelectedItem);
        run(&mut app, Action::NextItem);
        run(&mut app, Action::AddSelectedItem);
        set_customer(&mut app, CustomerField::Name, "Acme");
        run(&mut app, Action::ExportPdf);
        assert!(app.domain.quote.is_empty());

        run(&mut app, Action::OpenHistory);
        run(&mut app, Action::ConfirmModal);

        assert_eq!(app.domain.quote.lines().len(), 2);
        assert_eq!(app.domain.quote.customer_name, "Acme");
        assert_eq!(app.domain.quote.total(), Decimal::from(30));
        assert_eq!(app.domain.ledger.len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_working_quote() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore {
            fail_saves: true,
            ..MemoryStore::default()
        };
        let mut app = App::with_parts(
            Config {
                export_dir: dir.path().to_path_buf(),
                ..Config::default()
            },
            QuoteLedger::open(Box::new(store)),
            Outbox::new(dir.path().join("outbox")),
        );

        run(&mut app, Action::AddSelectedItem);
        run(&mut app, Action::ExportPdf);

        assert!(app.error.is_some());
        assert!(app.domain.ledger.is_empty());
        assert_eq!(app.domain.quote.lines().len(), 1);
        assert!(!app.config.pdf_path().exists());
    }

    #[test]
    fn test_failed_pdf_write_keeps_quote_for_retry() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let mut app = test_app(dir.path());
        app.config.export_dir = blocker;

        run(&mut app, Action::AddSelectedItem);
        run(&mut app, Action::ExportPdf);

        assert!(app.error.as_deref().unwrap().starts_with("Failed to write"));
        assert_eq!(app.domain.quote.lines().len(), 1);
        assert_eq!(app.domain.ledger.len(), 1);

        app.config.export_dir = dir.path().join("exports");
        run(&mut app, Action::ExportPdf);

        assert!(app.error.is_none());
        assert!(app.config.pdf_path().exists());
        assert!(app.domain.quote.is_empty());
        assert_eq!(app.domain.ledger.len(), 1);
    }

    #[test]
    fn test_edited_quote_after_failed_export_commits_again() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let mut app = test_app(dir.path());
        app.config.export_dir = blocker;

        run(&mut app, Action::AddSelectedItem);
        run(&mut app, Action::ExportPdf);
        run(&mut app, Action::AddSelectedItem);
        app.config.export_dir = dir.path().join("exports");
        run(&mut app, Action::ExportPdf);

        assert_eq!(app.domain.ledger.len(), 2);
        assert_eq!(app.domain.ledger.list()[0].total, Decimal::from(20));
    }

    #[test]
    fn test_failed_outbox_write_keeps_quote() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("outbox-file");
        fs::write(&blocker, "").unwrap();
        let mut app = test_app(dir.path());
        app.outbox = Outbox::new(&blocker);

        run(&mut app, Action::AddSelectedItem);
        set_customer(&mut app, CustomerField::Email, "buyer@acme.test");
        run(&mut app, Action::EmailQuote);

        assert!(app.error.is_some());
        assert_eq!(app.domain.quote.lines().len(), 1);
        assert_eq!(app.domain.quote.customer_email, "buyer@acme.test");
    }

    #[test]
    fn test_unreadable_history_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(HISTORY_FILE), "{ not json").unwrap();

        let app = App::new(Config::default(), dir.path());

        assert!(app.domain.ledger.is_empty());
        assert!(app.error.as_deref().unwrap().contains("starting empty"));
    }

    #[test]
    fn test_quit_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        run(&mut app, Action::OpenQuitDialog);
        run(&mut app, Action::CloseModal);
        assert!(!app.should_quit);

        run(&mut app, Action::OpenQuitDialog);
        run(&mut app, Action::ConfirmModal);
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_keys_route_to_query() {
        use crossterm::event::KeyModifiers;

        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let press = |c| KeyEvent::new(c, KeyModifiers::NONE);

        let enter = app.handle_key_event(press(KeyCode::Char('/'))).unwrap().unwrap();
        run(&mut app, enter);
        for c in "b".chars() {
            let action = app.handle_key_event(press(KeyCode::Char(c))).unwrap().unwrap();
            run(&mut app, action);
        }
        let done = app.handle_key_event(press(KeyCode::Enter)).unwrap().unwrap();
        run(&mut app, done);

        assert!(!app.home.search_mode);
        let item = app.home.selected_catalog_item(&app.domain.catalog).unwrap();
        assert_eq!(item.sku, "234567");
    }
}
