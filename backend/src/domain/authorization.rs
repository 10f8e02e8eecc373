//! Role-based access control.
//!
//! Each protected operation declares a fixed required-role set as an
//! [`AccessPolicy`] const in [`policy`]; the transport layer hands the
//! request's bearer token and the operation's policy to
//! [`AuthorizationGuard::authorize`] before dispatching. The guard is a
//! two-stage gate — authenticate, then test role membership — and the
//! stages never run out of order.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::identity_resolver::IdentityResolver;
use crate::domain::user::{Identity, Role};

/// Required-role set declared per operation.
///
/// Membership is an exact match against the identity's single role; no
/// role implies another. An empty set marks a public operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    required: &'static [Role],
}

impl AccessPolicy {
    /// Policy for operations anyone may call, token or not.
    pub const fn public() -> Self {
        Self { required: &[] }
    }

    /// Policy requiring the caller's role to be one of `roles`.
    pub const fn require(roles: &'static [Role]) -> Self {
        Self { required: roles }
    }

    /// Whether this operation skips authentication entirely.
    pub const fn is_public(&self) -> bool {
        self.required.is_empty()
    }

    /// Whether `role` is a member of the required set.
    pub fn permits(&self, role: Role) -> bool {
        self.required.contains(&role)
    }

    /// The declared role set.
    pub const fn required(&self) -> &'static [Role] {
        self.required
    }
}

/// Statically declared policies, one per operation.
///
/// This is the declarative role metadata for the whole API surface;
/// handlers consult it directly, so there is a single place to read who
/// may do what.
pub mod policy {
    use super::AccessPolicy;
    use crate::domain::user::Role;

    /// Component creation: admins only.
    pub const CREATE_COMPONENT: AccessPolicy = AccessPolicy::require(&[Role::Admin]);
    /// Component listing: any authenticated account.
    pub const LIST_COMPONENTS: AccessPolicy = AccessPolicy::require(&[Role::Admin, Role::Pro]);
    /// Category creation: admins only.
    pub const CREATE_CATEGORY: AccessPolicy = AccessPolicy::require(&[Role::Admin]);
    /// Category listing: admins only.
    pub const LIST_CATEGORIES: AccessPolicy = AccessPolicy::require(&[Role::Admin]);
}

/// Two-stage gate deciding access for a request.
#[derive(Clone)]
pub struct AuthorizationGuard {
    resolver: IdentityResolver,
}

impl AuthorizationGuard {
    /// Build a guard over an identity resolver.
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Decide access for `bearer` under `policy`.
    ///
    /// Public policies allow unconditionally and skip identity
    /// resolution; the return is `Ok(None)`. For protected policies,
    /// authentication always runs first: a missing token is unauthorized
    /// before any role is considered, and only a resolved identity is
    /// tested for membership. On success the identity is returned so the
    /// downstream operation can apply further checks of its own.
    pub async fn authorize(
        &self,
        bearer: Option<&str>,
        policy: &AccessPolicy,
    ) -> Result<Option<Identity>, Error> {
        if policy.is_public() {
            return Ok(None);
        }
        let Some(token) = bearer else {
            return Err(Error::unauthorized("authentication required"));
        };
        let identity = self.resolver.resolve(token).await?;
        if !policy.permits(identity.role()) {
            return Err(Error::forbidden("insufficient permissions"));
        }
        Ok(Some(identity))
    }
}
