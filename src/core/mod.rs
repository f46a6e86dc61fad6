//! Business operations - compose the pure rules with the repositories.
//!
//! Every function here is async, returns `Result`, and leaves business
//! rejections to the error taxonomy in [`crate::errors`]. Operations that
//! touch the ledger or more than one table run inside a database
//! transaction so partial writes cannot corrupt persisted state.

/// Formative actions: creation, edits, status, bonification reporting
pub mod action;
/// Formations and courses: queries, totals, custom bundles
pub mod catalog;
/// Student directory: validation, uniqueness, search
pub mod student;
/// Credit wallet: purchases, consumptions, balance, history
pub mod wallet;
