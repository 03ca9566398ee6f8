//! kh_crypto: Keyhaven cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Secret key material is zeroized on drop and never exposed by any
//!   accessor, log line, or serialized form.
//! - Public APIs return opaque handles so callers cannot misuse raw keys.
//!
//! # Module layout
//! - `cipher`:   XChaCha20-Poly1305 reversible encryption for secret fields
//! - `password`: Argon2id one-way hashing for login passwords
//! - `token`:    HMAC-SHA256 stateless bearer tokens
//! - `error`:    unified error type

pub mod cipher;
pub mod error;
pub mod password;
pub mod token;

pub use cipher::Cipher;
pub use error::CryptoError;
pub use password::PasswordHasher;
pub use token::{Claims, TokenKeys};
