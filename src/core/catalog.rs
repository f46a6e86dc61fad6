//! Catalog business logic - formations, their courses, and custom bundles.
//!
//! Formation totals (hours, catalog credit figure) are always derived by
//! summing over the bundled courses; nothing stores a precomputed total
//! that could drift. Custom formations are synthesized from a free-text
//! description and may have courses removed afterwards, guarded by the
//! duration floor.

use crate::{
    entities::{Course, Formation, course, formation},
    errors::{Error, Result},
    rules::{credits::format_duration, eligibility},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

/// A formation together with its courses and derived totals.
#[derive(Debug, Clone)]
pub struct FormationSummary {
    /// The formation record
    pub formation: formation::Model,
    /// Bundled courses
    pub courses: Vec<course::Model>,
    /// Sum of course durations, fractional hours
    pub total_hours: f64,
    /// Sum of the catalog credit figures (display only; consumption uses
    /// the hours-based policy in `rules::credits`)
    pub catalog_credits: i64,
}

impl FormationSummary {
    /// The formation's total duration as a catalog string.
    #[must_use]
    pub fn duration_label(&self) -> String {
        format_duration(self.total_hours)
    }
}

fn summarize(formation: formation::Model, courses: Vec<course::Model>) -> FormationSummary {
    let total_hours = courses.iter().map(|c| c.duration_hours).sum();
    let catalog_credits = courses.iter().map(|c| c.credits).sum();
    FormationSummary {
        formation,
        courses,
        total_hours,
        catalog_credits,
    }
}

/// Retrieves every formation ordered by name.
pub async fn get_all_formations(db: &DatabaseConnection) -> Result<Vec<formation::Model>> {
    Formation::find()
        .order_by_asc(formation::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Filters formations by name substring and optional category, matching
/// the catalog search box.
pub async fn find_formations(
    db: &DatabaseConnection,
    search: &str,
    category: Option<&str>,
) -> Result<Vec<formation::Model>> {
    let mut query = Formation::find().filter(formation::Column::Name.contains(search));
    if let Some(category) = category {
        query = query.filter(formation::Column::Category.eq(category));
    }
    query
        .order_by_asc(formation::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a formation with its courses and derived totals.
pub async fn get_formation_summary(
    db: &DatabaseConnection,
    formation_id: i64,
) -> Result<FormationSummary> {
    let formation = Formation::find_by_id(formation_id)
        .one(db)
        .await?
        .ok_or(Error::FormationNotFound { id: formation_id })?;

    let courses = formation
        .find_related(Course)
        .order_by_asc(course::Column::Id)
        .all(db)
        .await?;

    Ok(summarize(formation, courses))
}

/// Synthesizes a custom formation from a free-text description.
///
/// The plan is a deterministic three-course itinerary built around the
/// leading skill phrase of the description (the text up to the first
/// comma, period, or Spanish "y"/"e" conjunction). An empty description is
/// rejected.
pub async fn create_custom_formation(
    db: &DatabaseConnection,
    details: &str,
) -> Result<FormationSummary> {
    let details = details.trim();
    if details.is_empty() {
        return Err(Error::Validation {
            message: "Formation details are required".to_string(),
        });
    }

    let skill = leading_skill(details);

    let formation_model = formation::ActiveModel {
        name: Set(format!("Formación personalizada: {skill}")),
        category: Set("Personalizada".to_string()),
        description: Set(details.to_string()),
        is_popular: Set(false),
        is_custom: Set(true),
        ..Default::default()
    };
    let inserted = formation_model.insert(db).await?;

    let plan: [(&str, &str, &str, f64, i64, f64); 3] = [
        (
            "Fundamentos de ",
            "Fundamentos",
            "basic",
            3.5,
            3,
            4.6,
        ),
        ("Aplicación práctica", "Práctica", "intermediate", 4.75, 4, 4.7),
        ("Herramientas avanzadas", "Avanzado", "advanced", 2.25, 2, 4.8),
    ];
    for (name, category, level, hours, credit_figure, rating) in plan {
        let course_name = if name.ends_with(' ') {
            format!("{name}{skill}")
        } else {
            name.to_string()
        };
        let course_model = course::ActiveModel {
            name: Set(course_name),
            category: Set(category.to_string()),
            level: Set(level.to_string()),
            duration_hours: Set(hours),
            credits: Set(credit_figure),
            rating: Set(rating),
            is_popular: Set(false),
            description: Set(format!("Plan generado a partir de: {skill}")),
            formation_id: Set(Some(inserted.id)),
            ..Default::default()
        };
        course_model.insert(db).await?;
    }

    info!(formation_id = inserted.id, "Custom formation synthesized");
    get_formation_summary(db, inserted.id).await
}

/// Extracts the leading skill phrase of a free-text description.
fn leading_skill(details: &str) -> String {
    let head = details
        .split(['.', ','])
        .next()
        .unwrap_or(details);
    let head = head
        .split(" y ")
        .next()
        .and_then(|h| h.split(" e ").next())
        .unwrap_or(head)
        .trim();
    if head.is_empty() {
        "la competencia".to_string()
    } else {
        head.to_string()
    }
}

/// Removes a course from a custom formation, guarded by the duration floor.
///
/// The removal is refused with [`Error::BelowDurationFloor`] - carrying the
/// advisory students-to-remove count for `student_count` - when the
/// remaining courses would total under 18 hours. Removing the last course
/// is always refused. Only custom formations may be trimmed.
pub async fn remove_course_from_custom_formation(
    db: &DatabaseConnection,
    formation_id: i64,
    course_id: i64,
    student_count: usize,
) -> Result<FormationSummary> {
    let summary = get_formation_summary(db, formation_id).await?;

    if !summary.formation.is_custom {
        return Err(Error::Validation {
            message: "Only custom formations can be trimmed".to_string(),
        });
    }

    let Some(course) = summary.courses.iter().find(|c| c.id == course_id) else {
        return Err(Error::Validation {
            message: format!("Course {course_id} is not part of formation {formation_id}"),
        });
    };

    if summary.courses.len() == 1 {
        return Err(Error::Validation {
            message: "A formation must keep at least one course".to_string(),
        });
    }

    let remaining_hours = summary.total_hours - course.duration_hours;
    if let Some(shortfall) = eligibility::check_course_removal(remaining_hours, student_count) {
        return Err(Error::BelowDurationFloor {
            remaining_hours: shortfall.remaining_hours,
            required_hours: shortfall.required_hours,
            students_to_remove: shortfall.students_to_remove,
        });
    }

    Course::delete_by_id(course_id).exec(db).await?;
    info!(formation_id, course_id, "Course removed from custom formation");

    get_formation_summary(db, formation_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_formation, setup_test_db};

    #[tokio::test]
    async fn test_formation_summary_totals() -> Result<()> {
        let db = setup_test_db().await?;

        // Fixture: two courses, 4.5 h + 4.5 h, 3 + 3 catalog credits
        let formation = create_test_formation(&db, "VBA en Excel", 9.0).await?;
        let summary = get_formation_summary(&db, formation.id).await?;

        assert_eq!(summary.courses.len(), 2);
        assert_eq!(summary.total_hours, 9.0);
        assert_eq!(summary.catalog_credits, 6);
        assert_eq!(summary.duration_label(), "9 h. 0 min.");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_formation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_formation_summary(&db, 404).await;
        assert!(matches!(result, Err(Error::FormationNotFound { id: 404 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_find_formations_filters() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_formation(&db, "VBA en Excel", 10.0).await?;
        create_test_formation(&db, "Blockchain básico", 6.0).await?;

        let by_name = find_formations(&db, "Excel", None).await?;
        assert_eq!(by_name.len(), 1);

        let by_category = find_formations(&db, "", Some("Ofimática")).await?;
        assert_eq!(by_category.len(), 2); // fixture category is shared

        let none = find_formations(&db, "Excel", Some("Blockchain")).await?;
        assert!(none.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_custom_formation_plan() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = create_custom_formation(
            &db,
            "Formación en Excel avanzado para analistas financieros, con macros y tablas dinámicas",
        )
        .await?;

        assert!(summary.formation.is_custom);
        assert_eq!(summary.formation.category, "Personalizada");
        assert_eq!(summary.courses.len(), 3);
        assert_eq!(
            summary.courses[0].name,
            "Fundamentos de Formación en Excel avanzado para analistas financieros"
        );
        // 3.5 + 4.75 + 2.25
        assert_eq!(summary.total_hours, 10.5);
        assert_eq!(summary.catalog_credits, 9);

        Ok(())
    }

    #[tokio::test]
    async fn test_custom_formation_requires_details() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_custom_formation(&db, "   ").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_course_removal_below_floor_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        // 20-hour custom formation: removing a 4-hour course leaves 16 h,
        // under the 18-hour floor
        let summary = create_custom_formation(&db, "Competencia de prueba").await?;
        let formation_id = summary.formation.id;

        // Reshape the plan into 12 h + 4 h + 4 h
        let hours = [12.0, 4.0, 4.0];
        for (course, h) in summary.courses.iter().zip(hours) {
            let mut active: course::ActiveModel = course.clone().into();
            active.duration_hours = Set(h);
            active.update(&db).await?;
        }

        let victim = summary.courses[1].id;
        let result =
            remove_course_from_custom_formation(&db, formation_id, victim, 5).await;
        match result {
            Err(Error::BelowDurationFloor {
                remaining_hours,
                required_hours,
                students_to_remove,
            }) => {
                assert_eq!(remaining_hours, 16.0);
                assert_eq!(required_hours, 18.0);
                // 16 h already satisfies the 8-hour tier for 5 students
                assert_eq!(students_to_remove, 0);
            }
            other => panic!("expected BelowDurationFloor, got {other:?}"),
        }

        // Nothing was deleted
        let after = get_formation_summary(&db, formation_id).await?;
        assert_eq!(after.courses.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_course_removal_above_floor_succeeds() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = create_custom_formation(&db, "Competencia de prueba").await?;
        let formation_id = summary.formation.id;

        // Reshape into 20 h + 4 h + 4 h so one removal stays above 18 h
        let hours = [20.0, 4.0, 4.0];
        for (course, h) in summary.courses.iter().zip(hours) {
            let mut active: course::ActiveModel = course.clone().into();
            active.duration_hours = Set(h);
            active.update(&db).await?;
        }

        let victim = summary.courses[1].id;
        let after = remove_course_from_custom_formation(&db, formation_id, victim, 5).await?;
        assert_eq!(after.courses.len(), 2);
        assert_eq!(after.total_hours, 24.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_last_course_cannot_be_removed() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = create_custom_formation(&db, "Competencia de prueba").await?;
        let formation_id = summary.formation.id;

        // Give the survivor enough hours, then delete down to one course
        let mut active: course::ActiveModel = summary.courses[0].clone().into();
        active.duration_hours = Set(30.0);
        active.update(&db).await?;
        remove_course_from_custom_formation(&db, formation_id, summary.courses[1].id, 1).await?;
        remove_course_from_custom_formation(&db, formation_id, summary.courses[2].id, 1).await?;

        let survivor = get_formation_summary(&db, formation_id).await?.courses[0].id;
        let result = remove_course_from_custom_formation(&db, formation_id, survivor, 1).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[test]
    fn test_leading_skill_extraction() {
        assert_eq!(leading_skill("Excel avanzado, con macros"), "Excel avanzado");
        assert_eq!(leading_skill("Scrum y Kanban"), "Scrum");
        assert_eq!(leading_skill("Redes e infraestructura"), "Redes");
        assert_eq!(leading_skill("Python. Nivel inicial"), "Python");
    }
}
