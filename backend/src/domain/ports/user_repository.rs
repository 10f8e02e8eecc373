//! Port for the user persistence gateway.

use async_trait::async_trait;

use crate::domain::user::{Email, Identity, NewUser, UserId, UserRecord};

/// Persistence errors raised by user gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The email is already taken. The gateway, not the caller, is the
    /// uniqueness authority; callers must surface this conflict rather
    /// than retry around it.
    #[error("a user with this email already exists")]
    DuplicateEmail,
    /// Gateway connection could not be established.
    #[error("user gateway connection failed: {message}")]
    Connection {
        /// Adapter-reported cause.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user gateway query failed: {message}")]
    Query {
        /// Adapter-reported cause.
        message: String,
    },
}

/// Port over durable user storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account and return its public view. The gateway
    /// assigns the identifier and enforces email uniqueness.
    async fn create(&self, user: NewUser) -> Result<Identity, UserRepositoryError>;

    /// Fetch the public view of a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, UserRepositoryError>;

    /// Fetch a user row by email. The password hash is attached to the
    /// returned record only when `include_password` is set.
    async fn find_by_email(
        &self,
        email: &Email,
        include_password: bool,
    ) -> Result<Option<UserRecord>, UserRepositoryError>;
}
