//! Identity store: user records keyed by id and email.

use kh_crypto::PasswordHasher;
use kh_store::models::{NewUser, UserRow};
use kh_store::Store;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::VaultError;

/// Public projection of a user. The password hash never leaves this
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Clone)]
pub struct IdentityService {
    store: Store,
    hasher: PasswordHasher,
}

impl IdentityService {
    pub fn new(store: Store, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Create a user. The raw password is hashed before anything is
    /// persisted. Fails with Conflict when the email is taken; the store's
    /// unique constraint backstops a racing insert.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        raw_password: &str,
    ) -> Result<UserRecord, VaultError> {
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(VaultError::Conflict("email already registered".into()));
        }
        let password_hash = self.hasher.hash(raw_password)?;
        let row = self
            .store
            .insert_user(NewUser {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;
        info!(user_id = %row.id, "user created");
        Ok(row.into())
    }

    /// Full row, hash included: for password verification only.
    pub(crate) async fn find_row_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRow>, VaultError> {
        Ok(self.store.find_user_by_email(email).await?)
    }

    /// Minimal projection by id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, VaultError> {
        Ok(self.store.find_user_by_id(id).await?.map(UserRecord::from))
    }

    /// Remove the user record. Callers are responsible for having cleared
    /// the dependent vaults first.
    pub async fn delete(&self, id: &str) -> Result<(), VaultError> {
        self.store.delete_user_by_id(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
