//! Credit ledger entity - append-only record of wallet movements.
//!
//! Two entry kinds exist: purchases (positive credits, positive EUR amount)
//! and consumptions (negative credits tied to one formative action). The
//! wallet balance is the running sum over the credits column; nothing else
//! may mutate it.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger entry kind strings stored in the `entry_type` column.
pub mod entry_type {
    /// Credits bought for money
    pub const PURCHASE: &str = "purchase";
    /// Credits consumed by a formative action
    pub const CONSUMPTION: &str = "consumption";
}

/// Ledger entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Day the entry was recorded
    pub date: NaiveDate,
    /// "purchase" or "consumption"
    pub entry_type: String,
    /// Signed credit delta (positive purchase, negative consumption)
    pub credits: i64,
    /// Signed monetary amount in EUR, same sign as the credit delta
    pub amount_eur: f64,
    /// Action charged, for consumption entries
    pub action_id: Option<i64>,
    /// Credits per student, for consumption entries
    pub credits_per_student: Option<i64>,
    /// EUR cost per student, for consumption entries
    pub cost_per_student_eur: Option<f64>,
    /// Roster size charged, for consumption entries
    pub student_count: Option<i32>,
}

/// Defines relationships between LedgerEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Consumption entries reference the action they charge
    #[sea_orm(
        belongs_to = "super::action::Entity",
        from = "Column::ActionId",
        to = "super::action::Column::Id"
    )]
    Action,
}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Action.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
