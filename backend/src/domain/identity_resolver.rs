//! Maps bearer tokens back to live identities.
//!
//! Resolution re-fetches the user record on every request rather than
//! trusting the embedded claims, so deleting an account immediately
//! revokes its outstanding tokens. No identity is ever cached.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::token::{TokenError, TokenService};
use crate::domain::user::{Identity, UserId};

/// Resolves a raw bearer token to the identity it asserts.
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: TokenService,
    users: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    /// Build a resolver over the token service and the user gateway.
    pub fn new(tokens: TokenService, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Decode `token`, then look up its subject.
    ///
    /// Every authentication failure — bad signature, elapsed expiry,
    /// malformed subject, or a subject that no longer exists — maps to
    /// an unauthorized error. The returned identity never carries the
    /// password hash.
    pub async fn resolve(&self, token: &str) -> Result<Identity, Error> {
        let claims = self.tokens.decode(token).map_err(map_token_error)?;
        let subject =
            UserId::parse(&claims.sub).map_err(|_| Error::unauthorized("invalid token subject"))?;
        let identity = self
            .users
            .find_by_id(&subject)
            .await
            .map_err(map_gateway_error)?;
        identity.ok_or_else(|| Error::unauthorized("unknown token subject"))
    }
}

fn map_token_error(err: TokenError) -> Error {
    match err {
        TokenError::Expired => Error::unauthorized("token has expired"),
        TokenError::Invalid => Error::unauthorized("invalid token"),
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

fn map_gateway_error(err: UserRepositoryError) -> Error {
    Error::internal(format!("user gateway error: {err}"))
}
