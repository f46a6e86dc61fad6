//! Formative-action entity - a scheduled delivery of a formation.
//!
//! References one formation and, through enrollments, a roster of students.
//! The end date is derived from the formation's duration and the weekly
//! dedication; the status column holds the lifecycle state string.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Formative action database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actions")]
pub struct Model {
    /// Unique identifier for the action
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Formation this action delivers
    pub formation_id: i64,
    /// First training day (always a qualifying Thursday)
    pub start_date: NaiveDate,
    /// Derived last training day
    pub end_date: NaiveDate,
    /// Hours per week the roster dedicates (2-40)
    pub weekly_dedication: i32,
    /// Lifecycle state string (see `rules::lifecycle::ActionStatus`)
    pub status: String,
    /// Day the request was created
    pub creation_date: NaiveDate,
}

/// Defines relationships between Action and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each action delivers one formation
    #[sea_orm(
        belongs_to = "super::formation::Entity",
        from = "Column::FormationId",
        to = "super::formation::Column::Id"
    )]
    Formation,
    /// One action has many enrollments
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    /// One action may have ledger entries recorded against it
    #[sea_orm(has_many = "super::ledger_entry::Entity")]
    LedgerEntries,
}

impl Related<super::formation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Formation.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::ledger_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
