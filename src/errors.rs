//! Unified error types for `BonificaPro`.
//!
//! Every business rejection is user-correctable: the variants carry the
//! numbers a caller needs to render a message (current vs required counts,
//! the offending value) without re-deriving them.

use chrono::NaiveDate;
use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A required student field is missing or blank.
    #[error("Validation error: {message}")]
    Validation {
        /// Which field or constraint failed
        message: String,
    },

    /// The supplied email does not match the `local@domain.tld` shape.
    #[error("Malformed email address: {email}")]
    InvalidEmail {
        /// The rejected address
        email: String,
    },

    /// A student with this dni is already registered.
    #[error("A student with dni {dni} already exists")]
    DuplicateDni {
        /// The duplicate national id
        dni: String,
    },

    /// The selected roster is smaller than the computed minimum.
    #[error("Roster of {selected} students is below the required minimum of {required}")]
    IneligibleRoster {
        /// Students currently selected
        selected: usize,
        /// Minimum required for the chosen formation
        required: usize,
    },

    /// The chosen start date is not a qualifying Thursday.
    #[error("{date} is not a valid start date (must be a Thursday at least 4 business days ahead)")]
    InvalidStartDate {
        /// The rejected date
        date: NaiveDate,
    },

    /// Weekly dedication outside the 2-40 hours/week range.
    #[error("Weekly dedication of {hours} h is outside the allowed 2-40 range")]
    InvalidDedication {
        /// The rejected hours/week value
        hours: i32,
    },

    /// A mutation was attempted inside the 4-day pre-start window.
    #[error("Action is locked for editing: only {days_until_start} days until start (minimum 4)")]
    LockedForEdit {
        /// Calendar days remaining before the action starts
        days_until_start: i64,
    },

    /// Removing a course would drop the formation under the duration floor.
    #[error(
        "Removing the course would leave {remaining_hours} h, below the {required_hours} h floor"
    )]
    BelowDurationFloor {
        /// Hours the formation would have after removal
        remaining_hours: f64,
        /// Hours required by policy
        required_hours: f64,
        /// Advisory: students to remove for the reduced duration to qualify
        students_to_remove: usize,
    },

    /// The wallet cannot cover a consumption entry.
    #[error("Insufficient credits: {available} available, {required} required")]
    InsufficientCredits {
        /// Current wallet balance
        available: i64,
        /// Credits the operation would consume
        required: i64,
    },

    /// A consumption entry already exists for this action.
    #[error("Credits were already consumed for action {action_id}")]
    DuplicateConsumption {
        /// The action the duplicate entry targets
        action_id: i64,
    },

    /// Formative action lookup failed.
    #[error("Formative action {id} not found")]
    ActionNotFound {
        /// The missing id
        id: i64,
    },

    /// Formation lookup failed.
    #[error("Formation {id} not found")]
    FormationNotFound {
        /// The missing id
        id: i64,
    },

    /// Student lookup failed.
    #[error("Student {id} not found")]
    StudentNotFound {
        /// The missing id
        id: i64,
    },

    /// Configuration loading or parsing failure.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure (config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
