//! Student directory business logic.
//!
//! Students are created once and referenced by many formative actions. The
//! directory enforces the required fields (given name, both surnames, dni),
//! uppercases and deduplicates the dni, and checks the optional email
//! against a minimal `local@domain.tld` shape before accepting it.

use crate::{
    entities::{Student, student},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

/// Checks an email against the minimal accepted shape: a non-empty local
/// part, a single `@`, and a domain containing an interior dot, with no
/// whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || local.contains(char::is_whitespace)
        || domain.contains(char::is_whitespace)
        || domain.contains('@')
    {
        return false;
    }
    let bytes = domain.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'.' && i > 0 && i < bytes.len() - 1)
}

/// Creates a new student, performing input validation.
///
/// The given name, both surnames, and the dni are required; all inputs are
/// trimmed and the dni is uppercased. A dni already present in the
/// directory is rejected with [`Error::DuplicateDni`], and a non-empty
/// email must match the accepted shape.
pub async fn create_student(
    db: &DatabaseConnection,
    name: String,
    first_surname: String,
    second_surname: String,
    dni: String,
    phone: String,
    email: String,
) -> Result<student::Model> {
    let name = name.trim().to_string();
    let first_surname = first_surname.trim().to_string();
    let second_surname = second_surname.trim().to_string();
    let dni = dni.trim().to_uppercase();
    let phone = phone.trim().to_string();
    let email = email.trim().to_string();

    if name.is_empty() || first_surname.is_empty() || second_surname.is_empty() || dni.is_empty() {
        return Err(Error::Validation {
            message: "Name, both surnames, and dni are required".to_string(),
        });
    }

    if !email.is_empty() && !is_valid_email(&email) {
        return Err(Error::InvalidEmail { email });
    }

    let duplicate = Student::find()
        .filter(student::Column::Dni.eq(dni.clone()))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::DuplicateDni { dni });
    }

    let model = student::ActiveModel {
        name: Set(name),
        first_surname: Set(first_surname),
        second_surname: Set(second_surname),
        dni: Set(dni),
        phone: Set(phone),
        email: Set(email),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    info!(student_id = result.id, dni = %result.dni, "Student created");
    Ok(result)
}

/// Finds a student by its unique id.
pub async fn get_student_by_id(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Option<student::Model>> {
    Student::find_by_id(student_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the whole directory ordered by given name.
pub async fn get_all_students(db: &DatabaseConnection) -> Result<Vec<student::Model>> {
    Student::find()
        .order_by_asc(student::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Searches the directory by substring over given name, either surname, or
/// dni, matching the roster-picker search box.
pub async fn search_students(
    db: &DatabaseConnection,
    term: &str,
) -> Result<Vec<student::Model>> {
    Student::find()
        .filter(
            Condition::any()
                .add(student::Column::Name.contains(term))
                .add(student::Column::FirstSurname.contains(term))
                .add(student::Column::SecondSurname.contains(term))
                .add(student::Column::Dni.contains(term)),
        )
        .order_by_asc(student::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}
