//! OpenAPI documentation surface.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::catalog::{
    Category, CategoryId, CategoryName, Component, ComponentId, Description, Price, ThumbnailUrl,
    Title,
};
use crate::domain::error::{Error, ErrorCode};
use crate::domain::token::AccessToken;
use crate::domain::user::{Email, Identity, Role, UserId, UserName};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, SignupRequest};
use crate::inbound::http::components::{
    CreateCategoryRequest, CreateCategoryResponse, CreateComponentRequest,
    CreateComponentResponse, FindAllComponentsResponse,
};

/// Aggregated OpenAPI document for Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::components::create_component,
        crate::inbound::http::components::list_components,
        crate::inbound::http::components::create_category,
        crate::inbound::http::components::list_categories,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        LoginResponse,
        CreateComponentRequest,
        CreateComponentResponse,
        CreateCategoryRequest,
        CreateCategoryResponse,
        FindAllComponentsResponse,
        Identity,
        Role,
        UserId,
        UserName,
        Email,
        AccessToken,
        Component,
        ComponentId,
        Category,
        CategoryId,
        CategoryName,
        Title,
        Description,
        Price,
        ThumbnailUrl,
        Error,
        ErrorCode,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "components", description = "Catalogue categories and components"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
