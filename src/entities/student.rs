//! Student entity - directory of enrollable students.
//!
//! Students are created once and referenced by many actions; they are never
//! deleted. The dni column is the unique natural key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique identifier for the student
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub name: String,
    /// First surname
    pub first_surname: String,
    /// Second surname
    pub second_surname: String,
    /// National id, uppercased and unique
    #[sea_orm(unique)]
    pub dni: String,
    /// Contact phone, may be empty
    pub phone: String,
    /// Contact email, may be empty
    pub email: String,
}

/// Defines relationships between Student and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One student appears in many enrollments
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Model {
    /// Full display name: given name plus both surnames.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.name, self.first_surname, self.second_surname)
    }
}

impl ActiveModelBehavior for ActiveModel {}
