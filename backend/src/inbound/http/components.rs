//! Catalogue endpoints.
//!
//! ```text
//! POST /api/v1/components              (ADMIN)
//! GET  /api/v1/components?page=&limit=&title=   (ADMIN, PRO)
//! POST /api/v1/components/categories   (ADMIN)
//! GET  /api/v1/components/categories   (ADMIN)
//! ```
//!
//! Every handler hands its bearer token and declared policy to the
//! authorization guard before touching the catalogue.

use actix_web::{HttpResponse, get, post, web};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::authorization::policy;
use crate::domain::catalog::{
    CatalogValidationError, Category, CategoryId, CategoryName, Component, ComponentId,
    Description, NewComponent, Price, ThumbnailUrl, Title, TitleFilter,
};
use crate::domain::error::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerToken;
use crate::inbound::http::state::HttpState;

/// Component creation request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponentRequest {
    /// Listing title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Non-negative price.
    pub price: f64,
    /// Absolute thumbnail URL.
    pub url_thumbnail: String,
    /// Referenced category ids; every one must exist.
    pub categories: Vec<String>,
}

impl TryFrom<CreateComponentRequest> for NewComponent {
    type Error = Error;

    fn try_from(value: CreateComponentRequest) -> Result<Self, Self::Error> {
        let title = Title::new(value.title).map_err(|err| field_error("title", &err))?;
        let description =
            Description::new(value.description).map_err(|err| field_error("description", &err))?;
        let price = Price::new(value.price).map_err(|err| field_error("price", &err))?;
        let url_thumbnail = ThumbnailUrl::new(value.url_thumbnail)
            .map_err(|err| field_error("urlThumbnail", &err))?;
        if value.categories.is_empty() {
            return Err(Error::invalid_request("categories must not be empty")
                .with_details(json!({ "field": "categories" })));
        }
        let category_ids = value
            .categories
            .iter()
            .map(|raw| CategoryId::parse(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| field_error("categories", &err))?;
        Ok(NewComponent {
            title,
            description,
            price,
            url_thumbnail,
            category_ids,
        })
    }
}

/// Component creation response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponentResponse {
    /// Identifier of the created component.
    pub id: ComponentId,
}

/// Category creation request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    /// Category name; normalised to upper-case before storage.
    pub name: String,
}

/// Category creation response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryResponse {
    /// Identifier of the created category.
    pub id: CategoryId,
}

/// Query parameters for the paginated component listing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FindAllComponentsQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<u64>,
    /// Page size; defaults to 10.
    pub limit: Option<u64>,
    /// Case-insensitive title substring; blank means no filter.
    pub title: Option<String>,
}

impl FindAllComponentsQuery {
    fn into_parts(self) -> Result<(PageRequest, Option<TitleFilter>), Error> {
        let page = PageRequest::from_optional(self.page, self.limit)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let title = self.title.and_then(TitleFilter::new);
        Ok((page, title))
    }
}

/// Paginated component listing response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindAllComponentsResponse {
    /// Components on the requested page, title-ascending.
    pub data: Vec<Component>,
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Matching component count before pagination.
    pub total: u64,
}

impl From<Page<Component>> for FindAllComponentsResponse {
    fn from(value: Page<Component>) -> Self {
        Self {
            data: value.data,
            page: value.page,
            limit: value.limit,
            total: value.total,
        }
    }
}

fn field_error(field: &str, err: &CatalogValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Create a new component.
#[utoipa::path(
    post,
    path = "/api/v1/components",
    request_body = CreateComponentRequest,
    responses(
        (status = 201, description = "Component created", body = CreateComponentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Insufficient role", body = Error),
        (status = 404, description = "Category does not exist", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["components"],
    operation_id = "createComponent",
    security(("bearer" = []))
)]
#[post("/components")]
pub async fn create_component(
    state: web::Data<HttpState>,
    bearer: BearerToken,
    payload: web::Json<CreateComponentRequest>,
) -> ApiResult<HttpResponse> {
    state
        .guard
        .authorize(bearer.token(), &policy::CREATE_COMPONENT)
        .await?;
    let component = NewComponent::try_from(payload.into_inner())?;
    let created = state.catalog.create_component(component).await?;
    Ok(HttpResponse::Created().json(CreateComponentResponse { id: created.id() }))
}

/// Find all components, paginated.
#[utoipa::path(
    get,
    path = "/api/v1/components",
    params(FindAllComponentsQuery),
    responses(
        (status = 200, description = "Ok", body = FindAllComponentsResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Insufficient role", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["components"],
    operation_id = "findAllComponents",
    security(("bearer" = []))
)]
#[get("/components")]
pub async fn list_components(
    state: web::Data<HttpState>,
    bearer: BearerToken,
    query: web::Query<FindAllComponentsQuery>,
) -> ApiResult<web::Json<FindAllComponentsResponse>> {
    state
        .guard
        .authorize(bearer.token(), &policy::LIST_COMPONENTS)
        .await?;
    let (page, title) = query.into_inner().into_parts()?;
    let result = state.catalog.find_all_components(page, title).await?;
    Ok(web::Json(result.into()))
}

/// Create a new component category.
#[utoipa::path(
    post,
    path = "/api/v1/components/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CreateCategoryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Insufficient role", body = Error),
        (status = 409, description = "Category already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["components"],
    operation_id = "createCategory",
    security(("bearer" = []))
)]
#[post("/components/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    bearer: BearerToken,
    payload: web::Json<CreateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    state
        .guard
        .authorize(bearer.token(), &policy::CREATE_CATEGORY)
        .await?;
    let name = CategoryName::new(payload.into_inner().name)
        .map_err(|err| field_error("name", &err))?;
    let created = state.catalog.create_category(name).await?;
    Ok(HttpResponse::Created().json(CreateCategoryResponse { id: created.id() }))
}

/// Find all component categories.
#[utoipa::path(
    get,
    path = "/api/v1/components/categories",
    responses(
        (status = 200, description = "Ok", body = [Category]),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Insufficient role", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["components"],
    operation_id = "findAllCategories",
    security(("bearer" = []))
)]
#[get("/components/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    bearer: BearerToken,
) -> ApiResult<web::Json<Vec<Category>>> {
    state
        .guard
        .authorize(bearer.token(), &policy::LIST_CATEGORIES)
        .await?;
    let categories = state.catalog.find_all_categories().await?;
    Ok(web::Json(categories))
}

#[cfg(test)]
#[path = "components_tests.rs"]
mod tests;
