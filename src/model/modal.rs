//! Modal stack for managing overlays
//!
//! Dialogs are an enum-based stack rather than a set of `show_*` flags.
//! Text-entry modals carry their input buffer so the top of the stack is
//! the only place an in-progress edit lives.

use super::ui::CustomerField;
use crate::error::ImportKind;

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Saved quotes with line detail for the selected one
    History { selected_index: usize },
    /// Totals per day
    Report { scroll_offset: usize },
    /// CSV path prompt for an import
    Import { kind: ImportKind, path: String },
    /// New quantity for a quote line
    EditQuantity { sku: String, input: String },
    /// Customer name or email on the working quote
    EditCustomer { field: CustomerField, input: String },
    /// Imported customer list
    Customers { selected_index: usize },
    /// Help dialog showing all keyboard shortcuts
    Help { scroll_offset: usize },
}

impl Modal {
    /// Input buffer of a text-entry modal
    pub fn input_mut(&mut self) -> Option<&mut String> {
        match self {
            Modal::Import { path, .. } => Some(path),
            Modal::EditQuantity { input, .. } | Modal::EditCustomer { input, .. } => Some(input),
            _ => None,
        }
    }

    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            Modal::Import { .. } | Modal::EditQuantity { .. } | Modal::EditCustomer { .. }
        )
    }
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
