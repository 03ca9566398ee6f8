//! Environment-driven configuration.
//!
//! Both secrets are startup-fatal when absent: the process must refuse to
//! serve rather than fall back to plaintext storage or unsigned tokens.

use std::env;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::VaultError;

pub const CIPHER_SECRET_VAR: &str = "KEYHAVEN_CIPHER_SECRET";
pub const TOKEN_SECRET_VAR: &str = "KEYHAVEN_TOKEN_SECRET";
pub const HASH_COST_VAR: &str = "KEYHAVEN_HASH_COST";

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Config {
    /// Secret behind the reversible cipher for stored vault fields.
    pub cipher_secret: String,
    /// Secret signing bearer tokens.
    pub token_secret: String,
    /// Argon2id time cost for login-password hashing.
    pub hash_cost: u32,
}

impl Config {
    pub fn new(
        cipher_secret: impl Into<String>,
        token_secret: impl Into<String>,
        hash_cost: u32,
    ) -> Self {
        Self {
            cipher_secret: cipher_secret.into(),
            token_secret: token_secret.into(),
            hash_cost,
        }
    }

    pub fn from_env() -> Result<Self, VaultError> {
        let cipher_secret = require(CIPHER_SECRET_VAR)?;
        let token_secret = require(TOKEN_SECRET_VAR)?;
        let hash_cost = match env::var(HASH_COST_VAR) {
            Ok(v) => v.parse().map_err(|_| {
                VaultError::Config(format!("{HASH_COST_VAR} must be a positive integer"))
            })?,
            Err(_) => kh_crypto::password::DEFAULT_TIME_COST,
        };
        Ok(Self::new(cipher_secret, token_secret, hash_cost))
    }
}

fn require(var: &str) -> Result<String, VaultError> {
    match env::var(var) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(VaultError::Config(format!("{var} is not set"))),
    }
}
