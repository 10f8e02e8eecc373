//! Port for the component persistence gateway.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::catalog::{
    Category, Component, Description, Price, ThumbnailUrl, Title, TitleFilter,
};

/// Payload for creating a component whose categories have already been
/// confirmed to exist.
#[derive(Debug, Clone)]
pub struct NewComponentRecord {
    /// Listing title.
    pub title: Title,
    /// Free-form description.
    pub description: Description,
    /// Price.
    pub price: Price,
    /// Thumbnail location.
    pub url_thumbnail: ThumbnailUrl,
    /// Resolved category associations.
    pub categories: Vec<Category>,
}

/// Query for the paginated component listing.
#[derive(Debug, Clone)]
pub struct ComponentQuery {
    /// Page window to return.
    pub page: PageRequest,
    /// Optional case-insensitive title filter.
    pub title: Option<TitleFilter>,
}

/// Persistence errors raised by component gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentRepositoryError {
    /// Gateway connection could not be established.
    #[error("component gateway connection failed: {message}")]
    Connection {
        /// Adapter-reported cause.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("component gateway query failed: {message}")]
    Query {
        /// Adapter-reported cause.
        message: String,
    },
}

/// Port over durable component storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComponentRepository: Send + Sync {
    /// Persist a new component with its category associations and return
    /// it with its assigned id.
    async fn create(
        &self,
        component: NewComponentRecord,
    ) -> Result<Component, ComponentRepositoryError>;

    /// Fetch one page of components.
    ///
    /// Results are ordered title-ascending regardless of the filter, and
    /// the envelope's `total` counts every match before pagination.
    async fn find_page(
        &self,
        query: ComponentQuery,
    ) -> Result<Page<Component>, ComponentRepositoryError>;
}
