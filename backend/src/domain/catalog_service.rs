//! Catalogue consistency rules and queries.
//!
//! Owns the one referential-integrity rule the core enforces: a
//! component may only reference categories that exist at creation time.
//! The persistence gateway does not enforce it.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::debug;

use crate::domain::catalog::{Category, CategoryId, CategoryName, Component, NewComponent, TitleFilter};
use crate::domain::error::Error;
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ComponentQuery, ComponentRepository,
    ComponentRepositoryError, NewCategory, NewComponentRecord,
};

/// Category and component use-cases over the catalogue gateways.
#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    components: Arc<dyn ComponentRepository>,
}

impl CatalogService {
    /// Build the service over the category and component gateways.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        components: Arc<dyn ComponentRepository>,
    ) -> Self {
        Self {
            categories,
            components,
        }
    }

    /// Create a category.
    ///
    /// The name arrives upper-cased by construction, so the gateway's
    /// duplicate check always compares normalised spellings.
    pub async fn create_category(&self, name: CategoryName) -> Result<Category, Error> {
        let category = self
            .categories
            .create(NewCategory { name })
            .await
            .map_err(|err| match err {
                CategoryRepositoryError::DuplicateName => category_already_exists(),
                other => map_category_gateway_error(other),
            })?;

        debug!(category_id = %category.id(), name = %category.name(), "category created");
        Ok(category)
    }

    /// List every category.
    pub async fn find_all_categories(&self) -> Result<Vec<Category>, Error> {
        self.categories
            .find_all()
            .await
            .map_err(map_category_gateway_error)
    }

    /// Create a component after confirming every referenced category.
    ///
    /// The existence check is set-membership by count: if fewer
    /// categories resolve than ids were requested, the whole operation
    /// fails and nothing is persisted. The check and the write are two
    /// sequential steps, not a transaction; a category removed between
    /// them would go unnoticed.
    pub async fn create_component(&self, component: NewComponent) -> Result<Component, Error> {
        let NewComponent {
            title,
            description,
            price,
            url_thumbnail,
            category_ids,
        } = component;

        let categories = self
            .categories
            .find_by_ids(&category_ids)
            .await
            .map_err(map_category_gateway_error)?;
        if categories.len() != category_ids.len() {
            return Err(category_does_not_exist(&category_ids, &categories));
        }

        let component = self
            .components
            .create(NewComponentRecord {
                title,
                description,
                price,
                url_thumbnail,
                categories,
            })
            .await
            .map_err(map_component_gateway_error)?;

        debug!(component_id = %component.id(), "component created");
        Ok(component)
    }

    /// One page of components, optionally filtered by title.
    ///
    /// Ordering is title-ascending independent of the filter, and the
    /// envelope's `total` counts every match before pagination.
    pub async fn find_all_components(
        &self,
        page: PageRequest,
        title: Option<TitleFilter>,
    ) -> Result<Page<Component>, Error> {
        self.components
            .find_page(ComponentQuery { page, title })
            .await
            .map_err(map_component_gateway_error)
    }
}

fn category_already_exists() -> Error {
    Error::conflict("category already exists")
        .with_details(json!({ "code": "category_already_exists" }))
}

fn category_does_not_exist(requested: &[CategoryId], found: &[Category]) -> Error {
    let missing: Vec<String> = requested
        .iter()
        .filter(|id| !found.iter().any(|category| category.id() == **id))
        .map(ToString::to_string)
        .collect();
    Error::not_found("category does not exist").with_details(json!({
        "code": "category_does_not_exist",
        "missingIds": missing,
    }))
}

fn map_category_gateway_error(err: CategoryRepositoryError) -> Error {
    Error::internal(format!("category gateway error: {err}"))
}

fn map_component_gateway_error(err: ComponentRepositoryError) -> Error {
    Error::internal(format!("component gateway error: {err}"))
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
