//! Unified error type for barstock.
//!
//! Every failure in the crate is one of three kinds: the request never completed
//! (transport), the server answered with a non-2xx status (server), or the action was
//! rejected locally before any request was issued (validation). Configuration and I/O
//! errors only arise while loading settings or the session file.

use thiserror::Error;

/// Broad classification used by the front end to pick a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never completed
    Transport,
    /// The server rejected the request
    Server,
    /// The action was rejected before a request was issued
    Validation,
    /// Local configuration, session file or decoding problem
    Local,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Quantity must be a positive whole number, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Cannot add to bar. Store quantity of '{name}' is 0.")]
    StoreEmpty { name: String },

    #[error("Not enough '{name}' in store to add to bar: requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: i64,
        available: u32,
    },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Unknown subcategory '{sub_category}' for {main_category}")]
    UnknownSubCategory {
        main_category: String,
        sub_category: String,
    },

    #[error("Item not found: {id}")]
    ItemNotFound { id: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Sale not found: {id}")]
    SaleNotFound { id: String },

    #[error("Please select a user")]
    NoUserSelected,

    #[error("Sale quantity cannot be negative (line {index})")]
    NegativeQuantity { index: usize },

    #[error("Please select at least one item for sale")]
    EmptyCart,

    #[error("Line {index} has no item selected")]
    LineWithoutItem { index: usize },

    #[error("No cart line at index {index}")]
    LineOutOfRange { index: usize },

    #[error("Admin accounts cannot be changed here ({id})")]
    AdminProtected { id: String },

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Not signed in")]
    NotSignedIn,
}

impl Error {
    /// Classifies the error into transport, server, validation or local failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Request { .. } => ErrorKind::Server,
            Self::Config { .. } | Self::Io(_) | Self::Decode(_) | Self::Fmt(_) => ErrorKind::Local,
            _ => ErrorKind::Validation,
        }
    }

    /// Text suitable for a one-line user notification.
    ///
    /// Transport failures collapse to a generic message; server messages are passed
    /// through verbatim; everything else uses its display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Transport => "Request failed. Check your connection and try again.".to_string(),
            _ => self.to_string(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
