//! Password hashing.
//!
//! Passwords are hashed with bcrypt, which salts every hash, so hashing the
//! same password twice yields two different strings. Verification goes
//! through `bcrypt::verify`, which compares in constant time.

use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::AccountError;
use tracing::instrument;

/// One-way credential hashing used by the account service.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password.
    fn hash(&self, plaintext: &str) -> Result<String, AccountError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, AccountError>;
}

/// bcrypt-backed [`CredentialHasher`].
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with the given cost factor.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Crypto` if the cost is outside 10-14.
    pub fn new(cost: u32) -> Result<Self, AccountError> {
        validate_cost(cost)?;
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AccountError> {
        hash_password(plaintext, self.cost)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, AccountError> {
        verify_password(plaintext, hash)
    }
}

fn validate_cost(cost: u32) -> Result<(), AccountError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(AccountError::Crypto(format!(
            "Invalid bcrypt cost: {} (must be {}-{})",
            cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
        )));
    }
    Ok(())
}

/// Hash a password with bcrypt.
///
/// # Errors
///
/// Returns `AccountError::Crypto` if:
/// - Cost is outside the accepted range (10-14)
/// - Bcrypt hashing fails
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, AccountError> {
    // Checked again here so a direct caller can't produce a weak hash.
    validate_cost(cost)?;

    bcrypt::hash(password, cost)
        .map_err(|e| AccountError::Crypto(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a bcrypt hash
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AccountError> {
    bcrypt::verify(password, hash)
        .map_err(|e| AccountError::Crypto(format!("Password verification failed: {}", e)))
}
