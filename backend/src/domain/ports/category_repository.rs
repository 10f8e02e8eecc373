//! Port for the category persistence gateway.

use async_trait::async_trait;

use crate::domain::catalog::{Category, CategoryId, CategoryName};

/// Payload for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Normalised (upper-cased) name; creation fails on a duplicate.
    pub name: CategoryName,
}

/// Persistence errors raised by category gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryRepositoryError {
    /// The normalised name is already taken.
    #[error("a category with this name already exists")]
    DuplicateName,
    /// Gateway connection could not be established.
    #[error("category gateway connection failed: {message}")]
    Connection {
        /// Adapter-reported cause.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("category gateway query failed: {message}")]
    Query {
        /// Adapter-reported cause.
        message: String,
    },
}

/// Port over durable category storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category and return it with its assigned id.
    async fn create(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError>;

    /// Fetch the subset of categories whose ids appear in `ids`.
    ///
    /// Unknown ids are skipped, not errors; callers compare the returned
    /// set against what they asked for.
    async fn find_by_ids(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch every category, name-ascending.
    async fn find_all(&self) -> Result<Vec<Category>, CategoryRepositoryError>;
}
