//! Process configuration, loaded from the environment once at startup.
//!
//! Request-handling code never consults ambient environment state; the
//! bootstrap constructs one immutable [`AppConfig`] and passes its
//! values into the token service and hasher at wiring time. A missing
//! signing secret is startup-fatal, never a per-request condition.

use std::env;
use std::fmt;
use std::net::SocketAddr;

use zeroize::Zeroizing;

use crate::domain::password::PasswordHasher;

/// Environment variable naming the token-signing secret. Required.
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
/// Environment variable for the token lifetime in seconds.
pub const TOKEN_TTL_SECS_VAR: &str = "TOKEN_TTL_SECS";
/// Environment variable for the bcrypt work factor.
pub const BCRYPT_COST_VAR: &str = "BCRYPT_COST";
/// Environment variable for the listen address.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

/// Configuration errors; all of them are startup-fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The signing secret is absent or empty.
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,
    /// A variable is present but does not parse or is out of range.
    #[error("{name} is invalid: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Immutable application configuration.
pub struct AppConfig {
    jwt_secret: Zeroizing<String>,
    token_ttl_secs: i64,
    bcrypt_cost: u32,
    bind_addr: SocketAddr,
}

impl AppConfig {
    /// Token lifetime applied when none is configured: one hour.
    pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
    /// Listen address applied when none is configured.
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup(JWT_SECRET_VAR)
            .map(Zeroizing::new)
            .ok_or(ConfigError::MissingSecret)?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let token_ttl_secs = match lookup(TOKEN_TTL_SECS_VAR) {
            Some(raw) => parse_var(TOKEN_TTL_SECS_VAR, &raw)?,
            None => Self::DEFAULT_TOKEN_TTL_SECS,
        };
        if token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: TOKEN_TTL_SECS_VAR,
                message: "lifetime must be positive".to_owned(),
            });
        }

        let bcrypt_cost = match lookup(BCRYPT_COST_VAR) {
            Some(raw) => parse_var(BCRYPT_COST_VAR, &raw)?,
            None => PasswordHasher::DEFAULT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: BCRYPT_COST_VAR,
                message: "cost must be between 4 and 31".to_owned(),
            });
        }

        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => parse_var(BIND_ADDR_VAR, &raw)?,
            None => parse_var(BIND_ADDR_VAR, Self::DEFAULT_BIND_ADDR)?,
        };

        Ok(Self {
            jwt_secret,
            token_ttl_secs,
            bcrypt_cost,
            bind_addr,
        })
    }

    /// Token-signing secret; handed to the token service at wiring time
    /// and never logged.
    pub fn jwt_secret(&self) -> &Zeroizing<String> {
        &self.jwt_secret
    }

    /// Lifetime stamped into issued tokens.
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }

    /// bcrypt work factor for new credentials.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

// The secret must not appear in logs or panics.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("bind_addr", &self.bind_addr)
            .finish_non_exhaustive()
    }
}

fn parse_var<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
        name,
        message: err.to_string(),
    })
}
