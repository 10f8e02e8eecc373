//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod components;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::web;

/// Assemble the `/api/v1` scope with every REST endpoint registered.
///
/// Used by the server bootstrap and by integration tests so both run
/// the same routing table.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(auth::signup)
        .service(auth::login)
        .service(components::create_component)
        .service(components::list_components)
        .service(components::create_category)
        .service(components::list_categories)
}
