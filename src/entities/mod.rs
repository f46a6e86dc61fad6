//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod action;
pub mod course;
pub mod enrollment;
pub mod formation;
pub mod ledger_entry;
pub mod student;

// Re-export specific types to avoid conflicts
pub use action::{Column as ActionColumn, Entity as Action, Model as ActionModel};
pub use course::{Column as CourseColumn, Entity as Course, Model as CourseModel};
pub use enrollment::{Column as EnrollmentColumn, Entity as Enrollment, Model as EnrollmentModel};
pub use formation::{Column as FormationColumn, Entity as Formation, Model as FormationModel};
pub use ledger_entry::{
    Column as LedgerEntryColumn, Entity as LedgerEntry, Model as LedgerEntryModel,
};
pub use student::{Column as StudentColumn, Entity as Student, Model as StudentModel};
