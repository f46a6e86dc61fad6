//! Pure business rules for formative actions.
//!
//! Everything in this module is synchronous, clock-free, and storage-free:
//! functions take `today` and entity-derived numbers as arguments and return
//! plain values. The same rules used to be re-implemented inline by every
//! screen that needed them; consolidating them here keeps the copies from
//! drifting. The async operations in [`crate::core`] are the only callers
//! that pair these rules with the database.

/// Valid start-date computation (Thursdays, business-day lead time)
pub mod calendar;
/// Credit cost, end date, and duration-string handling
pub mod credits;
/// Roster minimums and protected-original roster selection
pub mod eligibility;
/// Action status machine, edit window, and bonification threshold
pub mod lifecycle;
