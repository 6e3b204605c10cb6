//! Core business logic - Framework-agnostic state models over the backend traits.
//!
//! Each module owns the list it works on for the lifetime of one command. Mutations
//! are validated locally first, sent to the server, and committed locally only once
//! the server confirms.

/// Sign-in, sign-out and the authorization hint
pub mod auth;
/// Item list with add, edit, delete and store-to-bar transfer
pub mod inventory;
/// Search, sort, partition and stock aggregates over items
pub mod query;
/// Dashboard figures and display formatting
pub mod report;
/// Sales-entry cart and the sales log
pub mod sales;
/// User directory for account administration
pub mod users;
