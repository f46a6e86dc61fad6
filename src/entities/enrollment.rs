//! Enrollment entity - links a student into a formative action.
//!
//! `is_original` marks students present at the action's last confirmed
//! save; those rows can never be removed by a later edit. The progress
//! fields are filled in by the external training platform.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Enrollment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    /// Unique identifier for the enrollment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The action the student is enrolled in
    pub action_id: i64,
    /// The enrolled student
    pub student_id: i64,
    /// Whether this student was part of the last confirmed roster
    pub is_original: bool,
    /// Completion percentage (0-100), reported externally
    pub progress: f64,
    /// Hours the student has dedicated so far
    pub dedication_hours: f64,
    /// Grade on a 0-10 scale
    pub grade: f64,
}

/// Defines relationships between Enrollment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each enrollment belongs to one action
    #[sea_orm(
        belongs_to = "super::action::Entity",
        from = "Column::ActionId",
        to = "super::action::Column::Id"
    )]
    Action,
    /// Each enrollment references one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Action.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
