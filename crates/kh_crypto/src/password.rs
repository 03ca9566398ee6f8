//! One-way hashing for login passwords.
//!
//! Argon2id in the PHC string format: the salt and parameters travel inside
//! the digest, so verification is always re-hash-and-compare. There is no
//! decrypt operation.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::CryptoError;

/// Memory cost in KiB: 64 MiB, tuned for interactive sign-in latency.
const MEMORY_COST_KIB: u32 = 64 * 1024;
const LANES: u32 = 1;

/// Default time cost when the deployment does not configure one.
pub const DEFAULT_TIME_COST: u32 = 3;

/// Salted one-way hasher with a fixed, configurable cost factor.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(time_cost: u32) -> Result<Self, CryptoError> {
        let params = Params::new(MEMORY_COST_KIB, time_cost, LANES, None)
            .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a raw password with a fresh random salt, returning a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, CryptoError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
        Ok(digest.to_string())
    }

    /// Verify a raw password against a stored digest.
    ///
    /// `Ok(false)` means the password does not match; `Err` means the stored
    /// digest itself is unusable.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, CryptoError> {
        let parsed =
            PasswordHash::new(digest).map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CryptoError::PasswordHash(e.to_string())),
        }
    }
}
