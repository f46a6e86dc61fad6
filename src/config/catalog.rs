//! Catalog seed data loading from config.toml.
//!
//! The formations and courses defined in config.toml seed the database on
//! first run, standing in for the commercial catalog feed.

use crate::entities::{Course, Formation, course, formation};
use crate::errors::{Error, Result};
use crate::rules::credits::parse_duration;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Formations to seed, each with its bundled courses
    pub formations: Vec<FormationConfig>,
}

/// Seed configuration for a single formation bundle
#[derive(Debug, Deserialize, Clone)]
pub struct FormationConfig {
    /// Formation name
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Whether the catalog highlights this formation
    #[serde(default)]
    pub is_popular: bool,
    /// Courses bundled into the formation
    pub courses: Vec<CourseConfig>,
}

/// Seed configuration for a single course
#[derive(Debug, Deserialize, Clone)]
pub struct CourseConfig {
    /// Course name
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Difficulty level
    #[serde(default = "default_level")]
    pub level: String,
    /// Duration string, "N h. M min."
    pub duration: String,
    /// Catalog credit figure per student
    pub credits: i64,
    /// Catalog rating
    #[serde(default)]
    pub rating: f64,
    /// Whether the catalog highlights this course
    #[serde(default)]
    pub is_popular: bool,
    /// Free-text description
    #[serde(default)]
    pub description: String,
}

fn default_level() -> String {
    "basic".to_string()
}

/// Loads catalog configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref())?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads catalog configuration from the default location (./config.toml).
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("config.toml")
}

/// Seeds the formation and course tables from a catalog config.
///
/// A non-empty formation table means the catalog was already seeded and the
/// call is a no-op, so repeated startups do not duplicate the catalog. The
/// seed runs in one transaction: a bad entry mid-config leaves the tables
/// empty, not half-seeded behind the already-seeded check.
pub async fn seed_catalog(db: &DatabaseConnection, config: &CatalogConfig) -> Result<()> {
    let existing = Formation::find().count(db).await?;
    if existing > 0 {
        info!(formations = existing, "Catalog already seeded, skipping");
        return Ok(());
    }

    let txn = db.begin().await?;

    for formation_cfg in &config.formations {
        let formation_model = formation::ActiveModel {
            name: Set(formation_cfg.name.clone()),
            category: Set(formation_cfg.category.clone()),
            description: Set(formation_cfg.description.clone()),
            is_popular: Set(formation_cfg.is_popular),
            is_custom: Set(false),
            ..Default::default()
        };
        let inserted = formation_model.insert(&txn).await?;

        for course_cfg in &formation_cfg.courses {
            let hours = parse_duration(&course_cfg.duration).ok_or_else(|| Error::Config {
                message: format!(
                    "Invalid duration {:?} for course {:?}",
                    course_cfg.duration, course_cfg.name
                ),
            })?;
            let course_model = course::ActiveModel {
                name: Set(course_cfg.name.clone()),
                category: Set(course_cfg.category.clone()),
                level: Set(course_cfg.level.clone()),
                duration_hours: Set(hours),
                credits: Set(course_cfg.credits),
                rating: Set(course_cfg.rating),
                is_popular: Set(course_cfg.is_popular),
                description: Set(course_cfg.description.clone()),
                formation_id: Set(Some(inserted.id)),
                ..Default::default()
            };
            course_model.insert(&txn).await?;
        }
    }

    txn.commit().await?;
    info!(
        formations = config.formations.len(),
        "Catalog seeded from config"
    );
    Ok(())
}
