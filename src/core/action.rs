//! Formative-action business logic.
//!
//! Creating or editing an action is the only place where the calendar,
//! eligibility, credit, and lifecycle rules all meet: the roster must meet
//! the minimum for the formation's duration, the start date must be a
//! qualifying Thursday, the dedication must be in range, and the wallet is
//! charged exactly once per roster. Everything that writes more than one
//! row runs inside a transaction.

use crate::{
    core::{catalog, wallet},
    entities::{Action, Enrollment, Student, action, enrollment, student},
    errors::{Error, Result},
    rules::{
        calendar::{days_until, is_valid_start_date},
        credits::{self, credits_per_student},
        eligibility::{RosterSelection, minimum_students_required},
        lifecycle::{ActionStatus, is_bonifiable, is_editable},
    },
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// Credit impact of a roster change, for display before confirming an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditSummary {
    /// Credits one student consumes for this formation
    pub credits_per_student: i64,
    /// Roster size already charged
    pub current_students: usize,
    /// Roster size after the change
    pub new_students: usize,
    /// Signed additional consumption (negative is informational only -
    /// credits already consumed are never refunded)
    pub delta_credits: i64,
    /// The delta priced in euros
    pub delta_eur: f64,
}

/// Computes the credit impact of growing or shrinking a roster.
pub fn credit_summary(
    credits_per_student: i64,
    current_students: usize,
    new_students: usize,
) -> CreditSummary {
    let delta_credits = credits::credits_delta(credits_per_student, current_students, new_students);
    #[allow(clippy::cast_precision_loss)]
    let delta_eur = delta_credits as f64 * wallet::EUR_PER_CREDIT;
    CreditSummary {
        credits_per_student,
        current_students,
        new_students,
        delta_credits,
        delta_eur,
    }
}

/// Finds a formative action by its id.
pub async fn get_action_by_id(
    db: &DatabaseConnection,
    action_id: i64,
) -> Result<Option<action::Model>> {
    Action::find_by_id(action_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every formative action, earliest start first.
pub async fn get_all_actions(db: &DatabaseConnection) -> Result<Vec<action::Model>> {
    Action::find()
        .order_by_asc(action::Column::StartDate)
        .order_by_asc(action::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The action's current enrollments.
pub async fn get_roster(
    db: &DatabaseConnection,
    action_id: i64,
) -> Result<Vec<enrollment::Model>> {
    Enrollment::find()
        .filter(enrollment::Column::ActionId.eq(action_id))
        .order_by_asc(enrollment::Column::StudentId)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn require_students<C: ConnectionTrait>(conn: &C, student_ids: &[i64]) -> Result<()> {
    for &id in student_ids {
        let found = Student::find_by_id(id).one(conn).await?;
        if found.is_none() {
            return Err(Error::StudentNotFound { id });
        }
    }
    Ok(())
}

/// Creates a formative action: validates the request, inserts the action
/// and its roster, and charges the wallet, all in one transaction.
///
/// The roster must meet the minimum for the formation's total duration, the
/// start date must be a Thursday at least four business days after `today`,
/// and the weekly dedication must be in the 2-40 range. Every enrolled
/// student is marked original, so later edits cannot remove them. The
/// wallet charge is `credits_per_student * roster size`; if the balance
/// cannot cover it, nothing is persisted.
pub async fn create_action(
    db: &DatabaseConnection,
    formation_id: i64,
    student_ids: &[i64],
    start_date: NaiveDate,
    weekly_dedication: i32,
    today: NaiveDate,
) -> Result<action::Model> {
    if !credits::is_valid_weekly_dedication(weekly_dedication) {
        return Err(Error::InvalidDedication {
            hours: weekly_dedication,
        });
    }
    if !is_valid_start_date(today, start_date) {
        return Err(Error::InvalidStartDate { date: start_date });
    }

    let summary = catalog::get_formation_summary(db, formation_id).await?;

    let mut roster = RosterSelection::new();
    for &id in student_ids {
        if !roster.is_selected(id) {
            roster.toggle(id);
        }
    }
    let required = minimum_students_required(summary.total_hours);
    if roster.count() < required {
        return Err(Error::IneligibleRoster {
            selected: roster.count(),
            required,
        });
    }
    require_students(db, &roster.ids()).await?;

    let per_student = credits_per_student(summary.total_hours);
    let end_date = credits::end_date(start_date, summary.total_hours, weekly_dedication).ok_or(
        Error::InvalidDedication {
            hours: weekly_dedication,
        },
    )?;

    let txn = db.begin().await?;

    let action_model = action::ActiveModel {
        formation_id: Set(formation_id),
        start_date: Set(start_date),
        end_date: Set(end_date),
        weekly_dedication: Set(weekly_dedication),
        status: Set(ActionStatus::Solicited.as_str().to_string()),
        creation_date: Set(today),
        ..Default::default()
    };
    let inserted = action_model.insert(&txn).await?;

    for id in roster.ids() {
        let enrollment_model = enrollment::ActiveModel {
            action_id: Set(inserted.id),
            student_id: Set(id),
            is_original: Set(true),
            progress: Set(0.0),
            dedication_hours: Set(0.0),
            grade: Set(0.0),
            ..Default::default()
        };
        enrollment_model.insert(&txn).await?;
    }

    wallet::record_consumption(&txn, inserted.id, per_student, roster.count(), today).await?;

    txn.commit().await?;
    info!(
        action_id = inserted.id,
        formation_id,
        students = roster.count(),
        "Formative action created"
    );
    Ok(inserted)
}

/// Edits an action's roster, weekly dedication, and optionally its start
/// date.
///
/// Refused with [`Error::LockedForEdit`] once fewer than four calendar days
/// remain before the current start. `selected_student_ids` is the checkbox
/// state of the roster picker: the final roster is its union with the
/// protected originals, so omitting an enrolled student silently keeps
/// them. A new start date must be a qualifying Thursday as seen from
/// `today`, like at creation. Added students are charged as an incremental
/// consumption entry, and the whole roster is re-marked original on save.
pub async fn update_action(
    db: &DatabaseConnection,
    action_id: i64,
    selected_student_ids: &[i64],
    weekly_dedication: i32,
    new_start_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<action::Model> {
    let current = get_action_by_id(db, action_id)
        .await?
        .ok_or(Error::ActionNotFound { id: action_id })?;

    if !is_editable(today, current.start_date) {
        return Err(Error::LockedForEdit {
            days_until_start: days_until(today, current.start_date),
        });
    }
    if !credits::is_valid_weekly_dedication(weekly_dedication) {
        return Err(Error::InvalidDedication {
            hours: weekly_dedication,
        });
    }
    let start_date = new_start_date.unwrap_or(current.start_date);
    if start_date != current.start_date && !is_valid_start_date(today, start_date) {
        return Err(Error::InvalidStartDate { date: start_date });
    }

    let summary = catalog::get_formation_summary(db, current.formation_id).await?;

    let enrolled = get_roster(db, action_id).await?;
    let mut roster = RosterSelection::with_originals(enrolled.iter().map(|e| e.student_id));
    for &id in selected_student_ids {
        if !roster.is_selected(id) {
            roster.toggle(id);
        }
    }

    let required = minimum_students_required(summary.total_hours);
    if roster.count() < required {
        return Err(Error::IneligibleRoster {
            selected: roster.count(),
            required,
        });
    }
    let added = roster.added_ids();
    require_students(db, &added).await?;

    let per_student = credits_per_student(summary.total_hours);
    let end_date = credits::end_date(start_date, summary.total_hours, weekly_dedication).ok_or(
        Error::InvalidDedication {
            hours: weekly_dedication,
        },
    )?;

    let txn = db.begin().await?;

    let mut active: action::ActiveModel = current.into();
    active.start_date = Set(start_date);
    active.weekly_dedication = Set(weekly_dedication);
    active.end_date = Set(end_date);
    let updated = active.update(&txn).await?;

    for &id in &added {
        let enrollment_model = enrollment::ActiveModel {
            action_id: Set(action_id),
            student_id: Set(id),
            is_original: Set(true),
            progress: Set(0.0),
            dedication_hours: Set(0.0),
            grade: Set(0.0),
            ..Default::default()
        };
        enrollment_model.insert(&txn).await?;
    }

    if !added.is_empty() {
        wallet::record_roster_increase(&txn, action_id, per_student, added.len(), today).await?;
    }

    txn.commit().await?;
    info!(
        action_id,
        added = added.len(),
        "Formative action updated"
    );
    Ok(updated)
}

/// Records the training platform's progress report for one enrollment.
///
/// Progress is a 0-100 percentage and the grade a 0-10 mark; out-of-range
/// figures are rejected. The student must be on the action's roster.
pub async fn record_progress(
    db: &DatabaseConnection,
    action_id: i64,
    student_id: i64,
    progress: f64,
    dedication_hours: f64,
    grade: f64,
) -> Result<enrollment::Model> {
    if !(0.0..=100.0).contains(&progress) {
        return Err(Error::Validation {
            message: format!("Progress must be between 0 and 100, got {progress}"),
        });
    }
    if !(0.0..=10.0).contains(&grade) {
        return Err(Error::Validation {
            message: format!("Grade must be between 0 and 10, got {grade}"),
        });
    }
    if dedication_hours < 0.0 {
        return Err(Error::Validation {
            message: format!("Dedicated hours cannot be negative, got {dedication_hours}"),
        });
    }

    get_action_by_id(db, action_id)
        .await?
        .ok_or(Error::ActionNotFound { id: action_id })?;

    let enrollment = Enrollment::find()
        .filter(enrollment::Column::ActionId.eq(action_id))
        .filter(enrollment::Column::StudentId.eq(student_id))
        .one(db)
        .await?
        .ok_or(Error::StudentNotFound { id: student_id })?;

    let mut active: enrollment::ActiveModel = enrollment.into();
    active.progress = Set(progress);
    active.dedication_hours = Set(dedication_hours);
    active.grade = Set(grade);
    let updated = active.update(db).await?;
    info!(action_id, student_id, progress, "Progress recorded");
    Ok(updated)
}

/// Moves an action one step forward in its lifecycle.
///
/// Only the single forward step defined by [`ActionStatus::can_transition`]
/// is accepted; anything else is a validation error.
pub async fn transition_status(
    db: &DatabaseConnection,
    action_id: i64,
    next: ActionStatus,
) -> Result<action::Model> {
    let current = get_action_by_id(db, action_id)
        .await?
        .ok_or(Error::ActionNotFound { id: action_id })?;

    let status = ActionStatus::parse(&current.status).ok_or_else(|| Error::Validation {
        message: format!("Action {action_id} has unknown status {:?}", current.status),
    })?;
    if !status.can_transition(next) {
        return Err(Error::Validation {
            message: format!(
                "Cannot move action {action_id} from {} to {}",
                status.as_str(),
                next.as_str()
            ),
        });
    }

    let mut active: action::ActiveModel = current.into();
    active.status = Set(next.as_str().to_string());
    let updated = active.update(db).await?;
    info!(action_id, status = next.as_str(), "Action status advanced");
    Ok(updated)
}

/// A student whose progress qualifies the company for bonification.
#[derive(Debug, Clone, PartialEq)]
pub struct BonifiableStudent {
    /// The enrolled student
    pub student: student::Model,
    /// Completion percentage reported by the training platform
    pub progress: f64,
}

/// Reports which students of an action have reached bonifiable progress.
pub async fn bonifiable_students(
    db: &DatabaseConnection,
    action_id: i64,
) -> Result<Vec<BonifiableStudent>> {
    get_action_by_id(db, action_id)
        .await?
        .ok_or(Error::ActionNotFound { id: action_id })?;

    let rows = Enrollment::find()
        .filter(enrollment::Column::ActionId.eq(action_id))
        .find_also_related(Student)
        .order_by_asc(enrollment::Column::StudentId)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter(|(enrollment, _)| is_bonifiable(enrollment.progress))
        .filter_map(|(enrollment, student)| {
            student.map(|student| BonifiableStudent {
                student,
                progress: enrollment.progress,
            })
        })
        .collect())
}
