//! Credit wallet business logic.
//!
//! The wallet is an append-only ledger: purchases add credits, consumptions
//! subtract them, and the balance is the running sum over every entry. No
//! entry is ever updated or deleted, so the history stays a faithful audit
//! trail of the training budget.

use crate::{
    entities::{LedgerEntry, ledger_entry, ledger_entry::entry_type},
    errors::{Error, Result},
    rules::credits::total_credits,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

/// Price of one training credit in euros.
pub const EUR_PER_CREDIT: f64 = 7.5;

/// Current wallet balance: the sum of the signed credit column over every
/// ledger entry.
pub async fn balance<C: ConnectionTrait>(conn: &C) -> Result<i64> {
    let entries = LedgerEntry::find().all(conn).await?;
    Ok(entries.iter().map(|e| e.credits).sum())
}

/// The full ledger, newest entries first.
pub async fn get_history(db: &DatabaseConnection) -> Result<Vec<ledger_entry::Model>> {
    LedgerEntry::find()
        .order_by_desc(ledger_entry::Column::Date)
        .order_by_desc(ledger_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a credit purchase.
///
/// The credit amount must be positive; the euro amount is derived from the
/// fixed per-credit price.
pub async fn record_purchase(
    db: &DatabaseConnection,
    credits: i64,
    date: NaiveDate,
) -> Result<ledger_entry::Model> {
    if credits <= 0 {
        return Err(Error::Validation {
            message: format!("Purchase amount must be positive, got {credits}"),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let amount_eur = credits as f64 * EUR_PER_CREDIT;
    let model = ledger_entry::ActiveModel {
        date: Set(date),
        entry_type: Set(entry_type::PURCHASE.to_string()),
        credits: Set(credits),
        amount_eur: Set(amount_eur),
        ..Default::default()
    };
    let result = model.insert(db).await?;
    info!(credits, amount_eur, "Credits purchased");
    Ok(result)
}

async fn consumption_entry<C: ConnectionTrait>(
    conn: &C,
    action_id: i64,
    credits_per_student: i64,
    student_count: usize,
    date: NaiveDate,
) -> Result<ledger_entry::Model> {
    let total = total_credits(credits_per_student, student_count);

    let available = balance(conn).await?;
    if available < total {
        return Err(Error::InsufficientCredits {
            available,
            required: total,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let amount_eur = -(total as f64) * EUR_PER_CREDIT;
    #[allow(clippy::cast_precision_loss)]
    let cost_per_student_eur = credits_per_student as f64 * EUR_PER_CREDIT;
    let model = ledger_entry::ActiveModel {
        date: Set(date),
        entry_type: Set(entry_type::CONSUMPTION.to_string()),
        credits: Set(-total),
        amount_eur: Set(amount_eur),
        action_id: Set(Some(action_id)),
        credits_per_student: Set(Some(credits_per_student)),
        cost_per_student_eur: Set(Some(cost_per_student_eur)),
        student_count: Set(Some(i32::try_from(student_count).unwrap_or(i32::MAX))),
        ..Default::default()
    };
    let result = model.insert(conn).await?;
    info!(action_id, credits = total, "Credits consumed");
    Ok(result)
}

/// Records the initial credit consumption for a formative action.
///
/// An action consumes exactly once at creation; a second consumption entry
/// for the same action is rejected with [`Error::DuplicateConsumption`], so
/// a double-submitted form cannot charge the wallet twice. A consumption
/// that would drive the balance negative is rejected with
/// [`Error::InsufficientCredits`].
pub async fn record_consumption<C: ConnectionTrait>(
    conn: &C,
    action_id: i64,
    credits_per_student: i64,
    student_count: usize,
    date: NaiveDate,
) -> Result<ledger_entry::Model> {
    let existing = LedgerEntry::find()
        .filter(ledger_entry::Column::ActionId.eq(action_id))
        .filter(ledger_entry::Column::EntryType.eq(entry_type::CONSUMPTION))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateConsumption { action_id });
    }

    consumption_entry(conn, action_id, credits_per_student, student_count, date).await
}

/// Records the incremental consumption when an action's roster grows.
///
/// Unlike the initial consumption this may happen several times per action,
/// once per edit that adds students. The balance check still applies.
pub async fn record_roster_increase<C: ConnectionTrait>(
    conn: &C,
    action_id: i64,
    credits_per_student: i64,
    added_students: usize,
    date: NaiveDate,
) -> Result<ledger_entry::Model> {
    consumption_entry(conn, action_id, credits_per_student, added_students, date).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_balance_is_running_sum() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(balance(&db).await?, 0);

        record_purchase(&db, 1000, date(2026, 1, 10)).await?;
        assert_eq!(balance(&db).await?, 1000);

        record_consumption(&db, 1, 7, 6, date(2026, 1, 15)).await?;
        assert_eq!(balance(&db).await?, 958);

        record_purchase(&db, 100, date(2026, 2, 1)).await?;
        assert_eq!(balance(&db).await?, 1058);

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_must_be_positive() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(matches!(
            record_purchase(&db, 0, date(2026, 1, 1)).await,
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            record_purchase(&db, -5, date(2026, 1, 1)).await,
            Err(Error::Validation { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_prices_in_euros() -> Result<()> {
        let db = setup_test_db().await?;

        let entry = record_purchase(&db, 1000, date(2026, 1, 10)).await?;
        assert_eq!(entry.amount_eur, 7500.0);
        assert_eq!(entry.entry_type, entry_type::PURCHASE);

        Ok(())
    }

    #[tokio::test]
    async fn test_consumption_refused_when_underfunded() -> Result<()> {
        let db = setup_test_db().await?;
        record_purchase(&db, 40, date(2026, 1, 10)).await?;

        // 7 credits x 6 students = 42 > 40
        let result = record_consumption(&db, 1, 7, 6, date(2026, 1, 15)).await;
        match result {
            Err(Error::InsufficientCredits {
                available,
                required,
            }) => {
                assert_eq!(available, 40);
                assert_eq!(required, 42);
            }
            other => panic!("expected InsufficientCredits, got {other:?}"),
        }
        // No entry was written
        assert_eq!(balance(&db).await?, 40);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_consumption_refused() -> Result<()> {
        let db = setup_test_db().await?;
        record_purchase(&db, 1000, date(2026, 1, 10)).await?;

        record_consumption(&db, 1, 7, 6, date(2026, 1, 15)).await?;
        let result = record_consumption(&db, 1, 7, 6, date(2026, 1, 15)).await;
        assert!(matches!(
            result,
            Err(Error::DuplicateConsumption { action_id: 1 })
        ));
        assert_eq!(balance(&db).await?, 958);

        Ok(())
    }

    #[tokio::test]
    async fn test_roster_increase_appends_delta() -> Result<()> {
        let db = setup_test_db().await?;
        record_purchase(&db, 1000, date(2026, 1, 10)).await?;

        record_consumption(&db, 1, 7, 6, date(2026, 1, 15)).await?;
        // Two more students later - a second entry for the same action
        let entry = record_roster_increase(&db, 1, 7, 2, date(2026, 2, 1)).await?;
        assert_eq!(entry.credits, -14);
        assert_eq!(entry.student_count, Some(2));
        assert_eq!(balance(&db).await?, 944);

        Ok(())
    }

    #[tokio::test]
    async fn test_history_newest_first() -> Result<()> {
        let db = setup_test_db().await?;

        record_purchase(&db, 100, date(2026, 1, 10)).await?;
        record_purchase(&db, 200, date(2026, 3, 1)).await?;
        record_purchase(&db, 300, date(2026, 2, 1)).await?;

        let history = get_history(&db).await?;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].credits, 200);
        assert_eq!(history[1].credits, 300);
        assert_eq!(history[2].credits, 100);

        Ok(())
    }
}
