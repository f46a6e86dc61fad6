//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Table
//! schemas are generated from the entity definitions through
//! `Schema::create_table_from_entity`, so the database always matches the
//! Rust structs without hand-written SQL.

use crate::entities::{Action, Course, Enrollment, Formation, LedgerEntry, Student};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or the default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/bonifica_pro.sqlite".to_string())
}

/// Establishes a connection using `DATABASE_URL`, falling back to a local
/// `SQLite` file when the variable is not set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let formation_table = schema.create_table_from_entity(Formation);
    let course_table = schema.create_table_from_entity(Course);
    let student_table = schema.create_table_from_entity(Student);
    let action_table = schema.create_table_from_entity(Action);
    let enrollment_table = schema.create_table_from_entity(Enrollment);
    let ledger_table = schema.create_table_from_entity(LedgerEntry);

    db.execute(builder.build(&formation_table)).await?;
    db.execute(builder.build(&course_table)).await?;
    db.execute(builder.build(&student_table)).await?;
    db.execute(builder.build(&action_table)).await?;
    db.execute(builder.build(&enrollment_table)).await?;
    db.execute(builder.build(&ledger_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        action::Model as ActionModel, course::Model as CourseModel,
        enrollment::Model as EnrollmentModel, formation::Model as FormationModel,
        ledger_entry::Model as LedgerEntryModel, student::Model as StudentModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Each table exists and is queryable
        let _: Vec<FormationModel> = Formation::find().limit(1).all(&db).await?;
        let _: Vec<CourseModel> = Course::find().limit(1).all(&db).await?;
        let _: Vec<StudentModel> = Student::find().limit(1).all(&db).await?;
        let _: Vec<ActionModel> = Action::find().limit(1).all(&db).await?;
        let _: Vec<EnrollmentModel> = Enrollment::find().limit(1).all(&db).await?;
        let _: Vec<LedgerEntryModel> = LedgerEntry::find().limit(1).all(&db).await?;

        Ok(())
    }
}
