//! Server assembly: configuration and dependency wiring.

pub mod config;

use std::sync::Arc;

use crate::domain::account_service::AccountService;
use crate::domain::authorization::AuthorizationGuard;
use crate::domain::catalog_service::CatalogService;
use crate::domain::identity_resolver::IdentityResolver;
use crate::domain::password::PasswordHasher;
use crate::domain::ports::{CategoryRepository, ComponentRepository, UserRepository};
use crate::domain::token::TokenService;
use crate::inbound::http::state::HttpState;
use config::AppConfig;

/// Wire the domain services over the given gateway adapters.
///
/// The signing secret and hash cost flow from `config` into the token
/// service and hasher here, once; nothing downstream reads the
/// environment.
pub fn build_state(
    config: &AppConfig,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    components: Arc<dyn ComponentRepository>,
) -> HttpState {
    let hasher = PasswordHasher::new(config.bcrypt_cost());
    let tokens = TokenService::new(config.jwt_secret().as_bytes(), config.token_ttl_secs());
    let resolver = IdentityResolver::new(tokens.clone(), Arc::clone(&users));

    HttpState {
        accounts: Arc::new(AccountService::new(users, hasher, tokens)),
        catalog: Arc::new(CatalogService::new(categories, components)),
        guard: Arc::new(AuthorizationGuard::new(resolver)),
    }
}
