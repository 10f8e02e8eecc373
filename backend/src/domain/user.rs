//! User identity model.
//!
//! [`Identity`] is the public view of an account and never carries
//! credentials; [`UserRecord`] is the gateway-owned row view whose
//! password hash is attached only when a lookup explicitly asks for it.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::password::PasswordHash;

/// Validation errors returned by the user value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was not a valid UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Email was missing or blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not look like an address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Role string did not match a known role.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Access role attached to every account.
///
/// Membership checks are exact: no role implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full catalogue write access.
    Admin,
    /// Paying account; read access to the catalogue.
    Pro,
}

impl Role {
    /// Wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Pro => "PRO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "PRO" => Ok(Self::Pro),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Stable user identifier.
///
/// Identifiers are opaque to the core; the persistence gateway assigns
/// them on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address, stored case-sensitively exactly as supplied.
///
/// ## Invariants
/// - Non-empty, no surrounding whitespace, and shaped like
///   `local@domain` with a dot in the domain. This is a shape check,
///   not a deliverability check.
/// - Never normalised: lookups and the uniqueness rule both see the
///   address as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.com")]
pub struct Email(String);

impl Email {
    /// Validate and construct an address.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, domain)) = raw.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        let domain_ok = domain.split('.').count() >= 2 && domain.split('.').all(|p| !p.is_empty());
        if local.is_empty() || !domain_ok || domain.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Human readable name attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Ada Lovelace")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a name; must be non-blank once trimmed.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(raw))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Public view of an account.
///
/// Resolved by the guard chain and returned by signup; has no password
/// field by construction, so credentials cannot leak through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: UserId,
    name: UserName,
    email: Email,
    role: Role,
}

impl Identity {
    /// Build an identity from validated components.
    pub fn new(id: UserId, name: UserName, email: Email, role: Role) -> Self {
        Self {
            id,
            name,
            email,
            role,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Access role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Gateway-owned user row.
///
/// `password_hash` is populated only when a lookup explicitly requested
/// the credential, mirroring the gateway contract.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Stable user identifier.
    pub id: UserId,
    /// Display name.
    pub name: UserName,
    /// Email address, unique across the gateway.
    pub email: Email,
    /// Access role.
    pub role: Role,
    /// Hashed credential, present only when requested.
    pub password_hash: Option<PasswordHash>,
}

impl UserRecord {
    /// The public view of this row, without the credential.
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.name.clone(), self.email.clone(), self.role)
    }
}

/// Payload for creating an account through the gateway.
///
/// The gateway assigns the identifier and enforces email uniqueness.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: UserName,
    /// Email address; creation fails if it is already taken.
    pub email: Email,
    /// Access role for the new account.
    pub role: Role,
    /// Hashed credential; the gateway never sees a plaintext password.
    pub password_hash: PasswordHash,
}
