//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - One parameterized statement per call
//! - Lookups that may miss return `Option`, lists return `Vec`
//! - Ids are validated `Id` values, never raw strings

pub mod courses;
pub mod news_items;
pub mod questions;
pub mod users;
pub mod variants;

pub use courses::CourseRepo;
pub use news_items::NewsItemRepo;
pub use questions::QuestionRepo;
pub use users::UserRepo;
pub use variants::VariantRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
