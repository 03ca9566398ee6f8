//! Credentials vault: login secrets scoped to their owner.

use kh_crypto::Cipher;
use kh_store::models::{CredentialPatch, CredentialRow, NewCredential};
use kh_store::Store;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::VaultError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCredential {
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCredential {
    pub title: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// A credential as returned to its owner: the secret field decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct CredentialsVault {
    store: Store,
    cipher: Cipher,
}

impl CredentialsVault {
    pub fn new(store: Store, cipher: Cipher) -> Self {
        Self { store, cipher }
    }

    /// Create a credential. The title pre-check gives a friendly Conflict;
    /// the UNIQUE(user_id, title) constraint settles any race. The secret
    /// is encrypted before the insert is attempted.
    pub async fn create(
        &self,
        dto: &CreateCredential,
        owner_id: &str,
    ) -> Result<Credential, VaultError> {
        if self
            .store
            .find_credential_by_title(&dto.title, owner_id)
            .await?
            .is_some()
        {
            return Err(VaultError::Conflict(
                "credential title already exists".into(),
            ));
        }
        let row = self
            .store
            .insert_credential(NewCredential {
                id: Uuid::new_v4().to_string(),
                user_id: owner_id.to_string(),
                title: dto.title.clone(),
                url: dto.url.clone(),
                username: dto.username.clone(),
                password_enc: self.cipher.encrypt(&dto.password)?,
            })
            .await?;
        info!(credential_id = %row.id, "credential created");
        self.decrypt(row)
    }

    pub async fn list_all(&self, owner_id: &str) -> Result<Vec<Credential>, VaultError> {
        let rows = self.store.find_all_credentials_by_owner(owner_id).await?;
        rows.into_iter().map(|row| self.decrypt(row)).collect()
    }

    pub async fn get_one(&self, id: &str, owner_id: &str) -> Result<Credential, VaultError> {
        let row = self.owned(id, owner_id).await?;
        self.decrypt(row)
    }

    /// Update fields of an owned credential; a supplied password is
    /// re-encrypted, absent fields stay untouched.
    pub async fn update(
        &self,
        id: &str,
        dto: &UpdateCredential,
        owner_id: &str,
    ) -> Result<Credential, VaultError> {
        self.owned(id, owner_id).await?;
        let patch = CredentialPatch {
            title: dto.title.clone(),
            url: dto.url.clone(),
            username: dto.username.clone(),
            password_enc: dto
                .password
                .as_deref()
                .map(|p| self.cipher.encrypt(p))
                .transpose()?,
        };
        let row = self.store.update_credential_by_id(id, patch).await?;
        self.decrypt(row)
    }

    pub async fn remove(&self, id: &str, owner_id: &str) -> Result<(), VaultError> {
        self.owned(id, owner_id).await?;
        self.store.delete_credential_by_id(id).await?;
        Ok(())
    }

    /// Unconditional owner-scoped bulk delete. Reserved for account
    /// erasure; never exposed to end users directly.
    pub async fn delete_all_for_owner(&self, owner_id: &str) -> Result<u64, VaultError> {
        Ok(self.store.delete_credentials_by_owner(owner_id).await?)
    }

    /// Fetch by id alone, then enforce ownership: absent is NotFound,
    /// present-but-foreign is Forbidden. The distinction is deliberate;
    /// existence leaks, content never does.
    async fn owned(&self, id: &str, owner_id: &str) -> Result<CredentialRow, VaultError> {
        let Some(row) = self.store.find_credential_by_id(id).await? else {
            return Err(VaultError::NotFound("credential not found".into()));
        };
        if row.user_id != owner_id {
            return Err(VaultError::Forbidden(
                "this credential does not belong to you".into(),
            ));
        }
        Ok(row)
    }

    /// Decrypt at the read boundary; nothing caches the plaintext.
    fn decrypt(&self, row: CredentialRow) -> Result<Credential, VaultError> {
        Ok(Credential {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            url: row.url,
            username: row.username,
            password: self.cipher.decrypt(&row.password_enc)?,
        })
    }
}
