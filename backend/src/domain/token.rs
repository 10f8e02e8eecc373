//! Signed bearer token issuance and validation.
//!
//! Tokens are stateless HS256 assertions carrying the subject's user id
//! and an expiry; nothing is stored server-side and expiry is the only
//! termination mechanism. The signing secret is loaded once at startup
//! and is the sole piece of process-wide shared state.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::UserId;

/// Claims embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the asserted user id, in string form.
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Token issuance and validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signature verified but the expiry timestamp has passed.
    #[error("token has expired")]
    Expired,
    /// The token is malformed or its signature does not verify.
    #[error("token is invalid")]
    Invalid,
    /// Signing failed; only possible with a broken key or claims shape.
    #[error("token signing failed: {message}")]
    Signing {
        /// Underlying encoder failure.
        message: String,
    },
}

/// Signed access token handed to a client at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct AccessToken(String);

impl AccessToken {
    /// The compact JWT form of the token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues and validates HS256 access tokens.
///
/// Validation tolerates [`TokenService::LEEWAY_SECS`] seconds of clock
/// skew between the issuing and verifying nodes; beyond that an elapsed
/// expiry is [`TokenError::Expired`].
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Clock-skew tolerance applied when checking expiry.
    pub const LEEWAY_SECS: u64 = 30;

    /// Build a service over the process-wide signing secret.
    ///
    /// `ttl_secs` is the lifetime stamped into every issued token.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = Self::LEEWAY_SECS;
        validation.validate_aud = false;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issue a token asserting `subject`, expiring after the configured
    /// lifetime.
    pub fn issue(&self, subject: UserId) -> Result<AccessToken, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken)
            .map_err(|err| TokenError::Signing {
                message: err.to_string(),
            })
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

// The keys wrap the signing secret; keep them out of Debug output.
impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
