//! Shared fixtures for HTTP adapter tests.
//!
//! Tests run against the real services wired over the in-memory gateway
//! adapters, with a cheap hash cost and a fixed signing secret.

use std::sync::Arc;

use crate::domain::account_service::AccountService;
use crate::domain::authorization::AuthorizationGuard;
use crate::domain::catalog_service::CatalogService;
use crate::domain::identity_resolver::IdentityResolver;
use crate::domain::password::PasswordHasher;
use crate::domain::ports::UserRepository;
use crate::domain::token::TokenService;
use crate::domain::user::{Email, NewUser, Role, UserName};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    InMemoryCategoryRepository, InMemoryComponentRepository, InMemoryUserRepository,
};

/// Signing secret used by every HTTP test.
pub const TEST_SECRET: &[u8] = b"test-signing-secret-0123456789abcdef";
/// Cheap bcrypt work factor for tests; production cost comes from config.
pub const TEST_COST: u32 = 4;
/// Seeded administrator credentials.
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin";

/// In-memory gateway bundle plus the wired HTTP state.
pub struct TestContext {
    pub state: HttpState,
    pub users: Arc<InMemoryUserRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub components: Arc<InMemoryComponentRepository>,
}

/// Build a fresh context over empty in-memory gateways.
pub fn test_context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let categories = Arc::new(InMemoryCategoryRepository::new());
    let components = Arc::new(InMemoryComponentRepository::new());

    let hasher = PasswordHasher::new(TEST_COST);
    let tokens = TokenService::new(TEST_SECRET, 3600);
    let resolver = IdentityResolver::new(
        tokens.clone(),
        Arc::clone(&users) as Arc<dyn UserRepository>,
    );

    let state = HttpState {
        accounts: Arc::new(AccountService::new(
            Arc::clone(&users) as Arc<dyn UserRepository>,
            hasher,
            tokens,
        )),
        catalog: Arc::new(CatalogService::new(
            Arc::clone(&categories) as _,
            Arc::clone(&components) as _,
        )),
        guard: Arc::new(AuthorizationGuard::new(resolver)),
    };

    TestContext {
        state,
        users,
        categories,
        components,
    }
}

/// Insert an administrator directly through the gateway.
///
/// Signup always assigns PRO, so tests that need an admin account have
/// to plant one the way operators do: at the gateway.
pub async fn seed_admin(context: &TestContext) {
    let hash = PasswordHasher::new(TEST_COST)
        .hash(ADMIN_PASSWORD)
        .expect("hash admin password");
    context
        .users
        .create(NewUser {
            name: UserName::new("Catalogue Admin").expect("valid name"),
            email: Email::new(ADMIN_EMAIL).expect("valid email"),
            role: Role::Admin,
            password_hash: hash,
        })
        .await
        .expect("seed admin");
}
