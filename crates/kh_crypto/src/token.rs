//! Stateless bearer tokens.
//!
//! Claims are JSON, signed with HMAC-SHA256 under a process-wide secret:
//!
//!   base64url(claims) "." base64url(tag)
//!
//! Tokens are self-contained; there is no revocation list, so the embedded
//! expiry is the only invalidation mechanism.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

pub const ISSUER: &str = "keyhaven";
pub const AUDIENCE: &str = "users";

/// Token validity window: 7 days.
const VALIDITY_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies bearer tokens.  Cheap to clone; the signing secret
/// is shared and zeroized when the last handle drops.
#[derive(Clone)]
pub struct TokenKeys {
    secret: Arc<Zeroizing<Vec<u8>>>,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Result<Self, CryptoError> {
        if secret.is_empty() {
            return Err(CryptoError::InvalidKey("token secret is empty".into()));
        }
        Ok(Self {
            secret: Arc::new(Zeroizing::new(secret.as_bytes().to_vec())),
        })
    }

    /// Sign a claim set binding `user_id` and `email`, valid for 7 days.
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String, CryptoError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(VALIDITY_DAYS)).timestamp(),
        };
        self.encode(&claims)
    }

    /// Validate encoding, signature, issuer/audience, and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, CryptoError> {
        let (body, tag) = token.split_once('.').ok_or(CryptoError::TokenMalformed)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag)
            .map_err(|_| CryptoError::TokenMalformed)?;

        // Authenticate before parsing: verify_slice is constant-time.
        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        mac.verify_slice(&tag)
            .map_err(|_| CryptoError::TokenSignature)?;

        let body = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| CryptoError::TokenMalformed)?;
        let claims: Claims =
            serde_json::from_slice(&body).map_err(|_| CryptoError::TokenMalformed)?;

        if claims.iss != ISSUER || claims.aud != AUDIENCE {
            return Err(CryptoError::TokenAudience);
        }
        if claims.exp <= Utc::now().timestamp() {
            return Err(CryptoError::TokenExpired);
        }
        Ok(claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, CryptoError> {
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{body}.{tag}"))
    }

    fn mac(&self) -> Result<HmacSha256, CryptoError> {
        HmacSha256::new_from_slice(self.secret.as_slice())
            .map_err(|_| CryptoError::InvalidKey("HMAC key rejected".into()))
    }
}
