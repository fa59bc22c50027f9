//! UI state - presentation state separate from domain data
//!
//! Note: Most UI state lives in HomeComponent which owns presentation state.

/// Which pane of the home screen receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Catalog,
    Quote,
}

impl Focus {
    pub fn toggle(self) -> Focus {
        match self {
            Focus::Catalog => Focus::Quote,
            Focus::Quote => Focus::Catalog,
        }
    }
}

/// Editable customer fields on the working quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Email,
}

impl CustomerField {
    pub fn label(&self) -> &'static str {
        match self {
            CustomerField::Name => "Customer Name",
            CustomerField::Email => "Customer Email",
        }
    }
}
