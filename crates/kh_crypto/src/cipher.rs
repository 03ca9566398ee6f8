//! Reversible cipher for secret vault fields.
//!
//! Uses XChaCha20-Poly1305 (192-bit nonce).
//! Key size: 32 bytes.  Nonce: 24 bytes (random).  Tag: 16 bytes.
//!
//! Ciphertext string format:
//!   base64url-no-pad( nonce (24 bytes) | ciphertext + tag )
//!
//! One [`Cipher`] is constructed per process from the configured secret and
//! handed to every component that stores recoverable secrets. The key never
//! leaves this module.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
    XChaCha20Poly1305,
};
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

const NONCE_LEN: usize = 24;

/// Domain separation for the HKDF expand step.
const KEY_INFO: &[u8] = b"kh-cipher-key-v1";

#[derive(ZeroizeOnDrop)]
struct KeyMaterial([u8; 32]);

/// Process-wide reversible cipher.  Cheap to clone; the key is shared and
/// zeroized when the last handle drops.
#[derive(Clone)]
pub struct Cipher {
    key: Arc<KeyMaterial>,
}

impl Cipher {
    /// Derive the 32-byte cipher key from the configured secret string.
    pub fn new(secret: &str) -> Result<Self, CryptoError> {
        if secret.is_empty() {
            return Err(CryptoError::InvalidKey("cipher secret is empty".into()));
        }
        let hk = Hkdf::<Sha256>::new(None, secret.as_bytes());
        let mut key = [0u8; 32];
        hk.expand(KEY_INFO, &mut key)
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
        Ok(Self {
            key: Arc::new(KeyMaterial(key)),
        })
    }

    /// Encrypt `plaintext`, prepending a random 24-byte nonce.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let cipher = XChaCha20Poly1305::new_from_slice(&self.key.0)
            .map_err(|_| CryptoError::AeadEncrypt)?;

        let nonce = XChaCha20Poly1305::generate_nonce(&mut AeadOsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::AeadEncrypt)?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(&out))
    }

    /// Decrypt a string produced by [`Cipher::encrypt`].
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let data = URL_SAFE_NO_PAD.decode(ciphertext)?;
        if data.len() < NONCE_LEN {
            return Err(CryptoError::AeadDecrypt);
        }
        let (nonce_bytes, ct) = data.split_at(NONCE_LEN);
        let nonce = chacha20poly1305::XNonce::from_slice(nonce_bytes);

        let cipher = XChaCha20Poly1305::new_from_slice(&self.key.0)
            .map_err(|_| CryptoError::AeadDecrypt)?;

        let plaintext = cipher
            .decrypt(nonce, ct)
            .map_err(|_| CryptoError::AeadDecrypt)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::AeadDecrypt)
    }
}
