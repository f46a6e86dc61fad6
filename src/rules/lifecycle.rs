//! Formative-action lifecycle rules.
//!
//! The status chain is `Solicited -> Scheduled -> InProgress -> Completed`,
//! driven externally (scheduling/ops); the engine only validates that a
//! proposed transition moves forward. Editability is a separate, date-based
//! rule: once fewer than four calendar days remain before the start, every
//! mutation is refused.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rules::calendar::days_until;

/// Calendar days before the start date after which an action locks.
const EDIT_LOCK_DAYS: i64 = 4;

/// Student progress (percent) at which bonification applies.
const BONIFIABLE_PROGRESS: f64 = 75.0;

/// Lifecycle status of a formative action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Requested by the company, awaiting review
    Solicited,
    /// Reviewed and scheduled by operations
    Scheduled,
    /// Training underway
    InProgress,
    /// Training finished
    Completed,
}

impl ActionStatus {
    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// Only single forward steps qualify; skipping a state or moving
    /// backward is rejected.
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Solicited, Self::Scheduled)
                | (Self::Scheduled, Self::InProgress)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Stable string form used in the database column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solicited => "solicited",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parses the database string form.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "solicited" => Some(Self::Solicited),
            "scheduled" => Some(Self::Scheduled),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Whether an action starting on `start_date` may still be edited today.
///
/// Editable while at least four calendar days remain before the start.
pub fn is_editable(today: NaiveDate, start_date: NaiveDate) -> bool {
    days_until(today, start_date) >= EDIT_LOCK_DAYS
}

/// Whether a student's progress qualifies the company for bonification.
///
/// Reporting only - settlement against the ledger is an external process.
pub fn is_bonifiable(progress_percent: f64) -> bool {
    progress_percent >= BONIFIABLE_PROGRESS
}
