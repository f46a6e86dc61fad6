//! Shared test fixtures.
//!
//! Every integration-style test gets a fresh in-memory `SQLite` database
//! with the full schema, plus helpers for the recurring fixtures: students
//! (all sharing the García López surnames so search tests have predictable
//! matches) and formations with a chosen total duration.

#![allow(clippy::unwrap_used)]

use crate::config::database::create_tables;
use crate::core::student::create_student;
use crate::entities::{course, formation, student};
use crate::errors::Result;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

/// Creates a fresh in-memory database with all tables.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates the standard test student: Ana García López, dni 12345678A.
pub async fn create_test_student(db: &DatabaseConnection) -> Result<student::Model> {
    create_custom_student(db, "Ana", "12345678A").await
}

/// Creates a student with a chosen given name and dni.
///
/// The surnames are fixed to García López, so a surname search matches
/// every fixture student.
pub async fn create_custom_student(
    db: &DatabaseConnection,
    name: &str,
    dni: &str,
) -> Result<student::Model> {
    create_student(
        db,
        name.to_string(),
        "García".to_string(),
        "López".to_string(),
        dni.to_string(),
        "600123456".to_string(),
        format!("{}@email.com", name.to_lowercase()),
    )
    .await
}

/// Creates a catalog formation with two equal courses summing to
/// `total_hours`, each carrying a catalog figure of 3 credits.
pub async fn create_test_formation(
    db: &DatabaseConnection,
    name: &str,
    total_hours: f64,
) -> Result<formation::Model> {
    let formation_model = formation::ActiveModel {
        name: Set(name.to_string()),
        category: Set("Ofimática".to_string()),
        description: Set(String::new()),
        is_popular: Set(false),
        is_custom: Set(false),
        ..Default::default()
    };
    let inserted = formation_model.insert(db).await?;

    for part in 1..=2 {
        let course_model = course::ActiveModel {
            name: Set(format!("{name} - parte {part}")),
            category: Set("Ofimática".to_string()),
            level: Set("basic".to_string()),
            duration_hours: Set(total_hours / 2.0),
            credits: Set(3),
            rating: Set(4.5),
            is_popular: Set(false),
            description: Set(String::new()),
            formation_id: Set(Some(inserted.id)),
            ..Default::default()
        };
        course_model.insert(db).await?;
    }

    Ok(inserted)
}
