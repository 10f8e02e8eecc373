//! Account signup and login orchestration.
//!
//! Signup validates, hashes, and persists; login looks up, verifies, and
//! issues a token. Neither use-case retries: any gateway failure is
//! fatal for the request and surfaces as an internal error.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::error::Error;
use crate::domain::password::{PasswordError, PasswordHasher};
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::token::{AccessToken, TokenService};
use crate::domain::user::{Email, Identity, NewUser, Role, UserName};

/// Validated signup payload.
///
/// The passwords stay wrapped in [`Zeroizing`] so plaintext is wiped
/// once the request is done with it.
#[derive(Debug, Clone)]
pub struct SignupDetails {
    /// Display name for the new account.
    pub name: UserName,
    /// Email address; must not already be registered.
    pub email: Email,
    /// Plaintext password.
    pub password: Zeroizing<String>,
    /// Confirmation; must equal `password` exactly.
    pub password_confirmation: Zeroizing<String>,
}

/// Validated login payload.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    /// Email address to look up.
    pub email: Email,
    /// Plaintext password to verify.
    pub password: Zeroizing<String>,
}

/// Signup and login use-cases over the user gateway.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AccountService {
    /// Build the service over the user gateway, hasher, and token
    /// service.
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// The confirmation check runs before any gateway access. New
    /// accounts always receive [`Role::Pro`]; signup never grants admin.
    /// The returned view carries no credential. A duplicate email is
    /// whatever conflict the gateway reports — the check is inherently
    /// racy, so the gateway's unique constraint is the authority.
    pub async fn signup(&self, details: SignupDetails) -> Result<Identity, Error> {
        let SignupDetails {
            name,
            email,
            password,
            password_confirmation,
        } = details;

        if password.as_str() != password_confirmation.as_str() {
            return Err(password_confirmation_invalid());
        }

        let password_hash = self.hasher.hash(&password).map_err(map_hasher_error)?;
        let identity = self
            .users
            .create(NewUser {
                name,
                email,
                role: Role::Pro,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                UserRepositoryError::DuplicateEmail => user_already_exists(),
                other => map_gateway_error(other),
            })?;

        debug!(user_id = %identity.id(), "account created");
        Ok(identity)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// An unknown email and a failed verification produce the very same
    /// error, so callers cannot probe which addresses are registered.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let LoginCredentials { email, password } = credentials;

        let record = self
            .users
            .find_by_email(&email, true)
            .await
            .map_err(map_gateway_error)?;
        let Some(record) = record else {
            return Err(invalid_credentials());
        };
        let Some(stored) = record.password_hash.as_ref() else {
            return Err(Error::internal(
                "user gateway returned no credential for a password lookup",
            ));
        };

        if !self
            .hasher
            .verify(&password, stored)
            .map_err(map_hasher_error)?
        {
            return Err(invalid_credentials());
        }

        self.tokens
            .issue(record.id)
            .map_err(|err| Error::internal(format!("token issuance failed: {err}")))
    }
}

fn password_confirmation_invalid() -> Error {
    Error::invalid_request("password confirmation does not match")
        .with_details(json!({ "code": "password_confirmation_invalid" }))
}

fn user_already_exists() -> Error {
    Error::conflict("user already exists").with_details(json!({ "code": "user_already_exists" }))
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn map_gateway_error(err: UserRepositoryError) -> Error {
    Error::internal(format!("user gateway error: {err}"))
}

fn map_hasher_error(err: PasswordError) -> Error {
    Error::internal(format!("credential hashing failed: {err}"))
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
