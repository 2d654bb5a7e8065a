//! # Catalog Error Types Module
//!
//! Typed failures of the FAQ catalog. Handlers match on these to pick the
//! reply a user sees; none of the details are ever shown to the user.

use thiserror::Error;

/// Errors returned by catalog reads and seeding
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No question row with this id
    #[error("question {0} not found")]
    QuestionNotFound(i32),
    /// Category name cannot be used as a routing token
    #[error("invalid category name {name:?}: {reason}")]
    InvalidCategoryName { name: String, reason: &'static str },
    /// Any failure reported by the database driver
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    /// True for lookups that found nothing, as opposed to storage failures
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::QuestionNotFound(_))
    }
}
