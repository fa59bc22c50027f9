//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::error::ImportKind;
use crate::model::ui::CustomerField;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick, no event arrived within the poll window
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next item in the focused list
    NextItem,
    /// Move to previous item in the focused list
    PrevItem,
    /// Jump to first item
    FirstItem,
    /// Jump to last item
    LastItem,
    /// Move focus between the catalog and quote panes
    SwitchFocus,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter catalog search mode
    EnterSearchMode,
    /// Exit search mode
    ExitSearchMode,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Working Quote
    // ─────────────────────────────────────────────────────────────────────────
    /// Add one unit of the selected catalog item
    AddSelectedItem,
    /// Open the quantity prompt for the selected quote line
    EditSelectedQuantity,
    /// Open the prompt for a customer field
    EditCustomer(CustomerField),
    /// Clear the working quote
    DiscardQuote,

    // ─────────────────────────────────────────────────────────────────────────
    // Import / Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the CSV path prompt
    OpenImport(ImportKind),
    /// Commit the quote and write the PDF
    ExportPdf,
    /// Commit the quote and queue it in the outbox
    EmailQuote,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open quote history
    OpenHistory,
    /// Open totals-by-date report
    OpenReport,
    /// Open imported customer list
    OpenCustomers,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,
    /// Type a character into the current prompt
    InputChar(char),
    /// Delete the last character of the current prompt
    InputBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::SwitchFocus => write!(f, "SwitchFocus"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::AddSelectedItem => write!(f, "AddSelectedItem"),
            Action::EditSelectedQuantity => write!(f, "EditSelectedQuantity"),
            Action::EditCustomer(field) => write!(f, "EditCustomer({})", field.label()),
            Action::DiscardQuote => write!(f, "DiscardQuote"),
            Action::OpenImport(kind) => write!(f, "OpenImport({})", kind.label()),
            Action::ExportPdf => write!(f, "ExportPdf"),
            Action::EmailQuote => write!(f, "EmailQuote"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHistory => write!(f, "OpenHistory"),
            Action::OpenReport => write!(f, "OpenReport"),
            Action::OpenCustomers => write!(f, "OpenCustomers"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::InputChar(c) => write!(f, "InputChar('{}')", c),
            Action::InputBackspace => write!(f, "InputBackspace"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
        }
    }
}
