//! Session orchestration: sign-up, sign-in, bearer authentication.

use kh_crypto::{PasswordHasher, TokenKeys};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::VaultError;
use crate::identity::{IdentityService, UserRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful sign-in payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
}

#[derive(Clone)]
pub struct SessionService {
    identity: IdentityService,
    hasher: PasswordHasher,
    tokens: TokenKeys,
}

impl SessionService {
    pub fn new(identity: IdentityService, hasher: PasswordHasher, tokens: TokenKeys) -> Self {
        Self {
            identity,
            hasher,
            tokens,
        }
    }

    pub async fn sign_up(&self, sign_up: &SignUp) -> Result<UserRecord, VaultError> {
        self.identity
            .create(&sign_up.name, &sign_up.email, &sign_up.password)
            .await
    }

    /// Unknown email and wrong password fail identically; nothing in the
    /// returned error reveals which.
    pub async fn sign_in(&self, email: &str, raw_password: &str) -> Result<Session, VaultError> {
        let Some(user) = self.identity.find_row_by_email(email).await? else {
            warn!("sign-in rejected");
            return Err(VaultError::Unauthenticated);
        };
        if !self.hasher.verify(raw_password, &user.password_hash)? {
            warn!("sign-in rejected");
            return Err(VaultError::Unauthenticated);
        }
        let token = self.tokens.issue(&user.id, &user.email)?;
        info!(user_id = %user.id, "sign-in ok");
        Ok(Session { token })
    }

    /// Resolve a bearer token to its owning user. Any defect in the token
    /// is Unauthenticated; so is a valid token whose account has since
    /// been erased.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, VaultError> {
        let claims = self
            .tokens
            .verify(token)
            .map_err(|_| VaultError::Unauthenticated)?;
        let Some(user) = self.identity.find_by_id(&claims.sub).await? else {
            return Err(VaultError::Unauthenticated);
        };
        Ok(AuthenticatedUser {
            id: user.id,
            email: user.email,
        })
    }
}
