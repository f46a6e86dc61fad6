//! Formation entity - a purchasable bundle of one or more courses.
//!
//! Formations are either hand-picked catalog bundles or custom bundles
//! synthesized from a free-text description.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Formation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "formations")]
pub struct Model {
    /// Unique identifier for the formation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable formation name
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Free-text description
    pub description: String,
    /// Whether the catalog highlights this formation
    pub is_popular: bool,
    /// Whether this bundle was synthesized rather than hand-picked
    pub is_custom: bool,
}

/// Defines relationships between Formation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One formation bundles many courses
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
    /// One formation backs many formative actions
    #[sea_orm(has_many = "super::action::Entity")]
    Actions,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
