use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("AEAD encryption failed")]
    AeadEncrypt,

    #[error("AEAD decryption failed (wrong key or corrupt ciphertext)")]
    AeadDecrypt,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Malformed token")]
    TokenMalformed,

    #[error("Token signature verification failed")]
    TokenSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token issuer or audience mismatch")]
    TokenAudience,

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}
