use kh_crypto::CryptoError;
use kh_store::StoreError;
use thiserror::Error;

/// Uniform sign-in failure text. Deliberately identical for "no such
/// account" and "wrong password"; never reveal which one happened.
pub const UNAUTHENTICATED_MSG: &str = "email or password not valid";

#[derive(Debug, Error)]
pub enum VaultError {
    /// Duplicate unique key: a user email, or a per-owner title in any
    /// vault.
    #[error("{0}")]
    Conflict(String),

    /// Missing/invalid/expired token, failed sign-in, or failed erase
    /// re-authentication. Carries no payload that could distinguish
    /// causes.
    #[error("email or password not valid")]
    Unauthenticated,

    /// Id-addressed operation on a record that does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Record exists but belongs to another user. Deliberately distinct
    /// from NotFound: existence leaks, content never does.
    #[error("{0}")]
    Forbidden(String),

    /// Missing or unusable startup configuration. Fatal; the process must
    /// refuse to serve rather than degrade to plaintext.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Store(StoreError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl From<StoreError> for VaultError {
    fn from(e: StoreError) -> Self {
        match e {
            // The schema backstop for the check-then-insert race surfaces
            // as the same kind the pre-check produces.
            StoreError::UniqueViolation => VaultError::Conflict("unique key already exists".into()),
            other => VaultError::Store(other),
        }
    }
}
