//! Password hashing and verification.
//!
//! Credentials are digested with bcrypt: deliberately slow, salted, and
//! one-way. Verification delegates to the algorithm's own comparison so
//! timing does not depend on where a mismatch occurs; plaintexts are
//! never compared directly.

use std::fmt;

/// Errors raised while hashing or verifying credentials.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The bcrypt primitive rejected the input or the stored digest.
    #[error("credential hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// One-way bcrypt digest of a password.
///
/// The digest embeds its salt and cost; it is opaque to the rest of the
/// core and is never serialised into responses.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed digest, e.g. one read back from the
    /// persistence gateway.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// The digest in its textual bcrypt form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Keep digests out of logs; the value is only useful to an attacker.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Hashes and verifies passwords with a fixed work factor.
///
/// Pure and stateless apart from the configured cost; both operations
/// are CPU-bound and perform no I/O.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor applied when none is configured.
    pub const DEFAULT_COST: u32 = 10;

    /// Create a hasher with the given bcrypt cost factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Digest `plaintext` with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordError> {
        Ok(PasswordHash(bcrypt::hash(plaintext, self.cost)?))
    }

    /// Check `plaintext` against a stored digest.
    ///
    /// Returns `Ok(false)` on a mismatch; `Err` only when the digest
    /// itself is malformed.
    pub fn verify(&self, plaintext: &str, digest: &PasswordHash) -> Result<bool, PasswordError> {
        Ok(bcrypt::verify(plaintext, digest.as_str())?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}
