//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they only
//! depend on domain services and remain testable with substituted
//! gateways.

use std::sync::Arc;

use crate::domain::account_service::AccountService;
use crate::domain::authorization::AuthorizationGuard;
use crate::domain::catalog_service::CatalogService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login use-cases.
    pub accounts: Arc<AccountService>,
    /// Catalogue use-cases.
    pub catalog: Arc<CatalogService>,
    /// Access-control gate invoked before every protected operation.
    pub guard: Arc<AuthorizationGuard>,
}
