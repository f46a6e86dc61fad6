//! Course entity - a single catalog course.
//!
//! Courses are immutable reference data. A course may belong to a formation
//! bundle; formation totals (hours, catalog credits) are sums over its
//! courses.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Course database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    /// Unique identifier for the course
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable course name
    pub name: String,
    /// Catalog category (e.g., "Ofimática", "Blockchain")
    pub category: String,
    /// Difficulty level (e.g., "basic", "advanced")
    pub level: String,
    /// Duration in fractional hours
    pub duration_hours: f64,
    /// Catalog credit figure per student
    pub credits: i64,
    /// Average catalog rating (0-5)
    pub rating: f64,
    /// Whether the catalog highlights this course
    pub is_popular: bool,
    /// Free-text description
    pub description: String,
    /// Formation bundle this course belongs to, if any
    pub formation_id: Option<i64>,
}

/// Defines relationships between Course and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each course belongs to at most one formation
    #[sea_orm(
        belongs_to = "super::formation::Entity",
        from = "Column::FormationId",
        to = "super::formation::Column::Id"
    )]
    Formation,
}

impl Related<super::formation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Formation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
