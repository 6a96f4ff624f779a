//! Password validation and hashing.
//!
//! `ValidatedPassword` wraps a raw password that meets the length rule.
//! `PasswordHash` turns a `ValidatedPassword` into a salted bcrypt hash.

use std::fmt::Display;

use bcrypt::{BcryptError, hash};

/// Shortest password accepted at registration, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PasswordError {
    #[error("password must be longer than or equal to {min} characters")]
    TooShort { min: usize },
}

/// A password that has been validated, but not yet hashed.
#[derive(Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Validate a raw password.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::TooShort` for passwords under
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(raw_password: &str) -> Result<Self, PasswordError> {
        if raw_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok(Self(raw_password.to_string()))
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

impl std::fmt::Debug for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ValidatedPassword({self})")
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Work factor used when none is configured.
    pub const DEFAULT_COST: u32 = 10;

    /// Smallest work factor bcrypt accepts.
    pub const MIN_COST: u32 = 4;

    /// Largest work factor bcrypt accepts.
    pub const MAX_COST: u32 = 31;

    /// Hash a validated password with the given bcrypt `cost`.
    ///
    /// Every call draws a fresh salt, so hashing the same password twice
    /// yields two different hashes.
    pub fn new(password: &ValidatedPassword, cost: u32) -> Result<Self, BcryptError> {
        hash(&password.0, cost).map(Self)
    }

    /// Wrap an existing hash without checking it.
    #[cfg(test)]
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches this hash.
    #[cfg(test)]
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(raw_password, &self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod password_hash_tests {
    use super::{PasswordHash, ValidatedPassword};

    #[test]
    fn verify_password_succeeds_for_matching_password() {
        let password = ValidatedPassword::new("correct horse").unwrap();
        let hash = PasswordHash::new(&password, 4).unwrap();

        assert!(hash.verify("correct horse").unwrap());
        assert!(!hash.verify("wrong horse").unwrap());
    }

    #[test]
    fn hashing_twice_salts_differently() {
        let password = ValidatedPassword::new("samepassword").unwrap();

        let first = PasswordHash::new(&password, 4).unwrap();
        let second = PasswordHash::new(&password, 4).unwrap();

        assert_ne!(first, second);
        assert!(first.verify("samepassword").unwrap());
        assert!(second.verify("samepassword").unwrap());
    }

    #[test]
    fn hash_never_contains_raw_password() {
        let password = ValidatedPassword::new("plaintext-secret").unwrap();
        let hash = PasswordHash::new(&password, 4).unwrap();

        assert!(!hash.as_str().contains("plaintext-secret"));
        assert!(hash.as_str().starts_with("$2"));
    }
}
