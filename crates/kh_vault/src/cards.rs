//! Cards vault: payment cards scoped to their owner.
//!
//! Two fields are recoverable secrets (cvc, password); the card number and
//! the rest of the metadata are stored as-is, matching the upstream data
//! model.

use chrono::NaiveDate;
use kh_crypto::Cipher;
use kh_store::models::{CardPatch, CardRow, NewCard};
use kh_store::Store;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::VaultError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCard {
    pub title: String,
    /// Printed cardholder name.
    pub name: String,
    pub number: String,
    pub cvc: String,
    pub expiration: NaiveDate,
    pub password: String,
    pub is_credit: bool,
    pub is_debit: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCard {
    pub title: Option<String>,
    pub name: Option<String>,
    pub number: Option<String>,
    pub cvc: Option<String>,
    pub expiration: Option<NaiveDate>,
    pub password: Option<String>,
    pub is_credit: Option<bool>,
    pub is_debit: Option<bool>,
}

/// A card as returned to its owner: secret fields decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub name: String,
    pub number: String,
    pub cvc: String,
    pub expiration: NaiveDate,
    pub password: String,
    pub is_credit: bool,
    pub is_debit: bool,
}

#[derive(Clone)]
pub struct CardsVault {
    store: Store,
    cipher: Cipher,
}

impl CardsVault {
    pub fn new(store: Store, cipher: Cipher) -> Self {
        Self { store, cipher }
    }

    /// Create a card. The title pre-check gives a friendly Conflict; the
    /// UNIQUE(user_id, title) constraint settles any race. Secrets are
    /// encrypted before the insert is attempted.
    pub async fn create(&self, dto: &CreateCard, owner_id: &str) -> Result<Card, VaultError> {
        if self
            .store
            .find_card_by_title(&dto.title, owner_id)
            .await?
            .is_some()
        {
            return Err(VaultError::Conflict("card title already exists".into()));
        }
        let row = self
            .store
            .insert_card(NewCard {
                id: Uuid::new_v4().to_string(),
                user_id: owner_id.to_string(),
                title: dto.title.clone(),
                name: dto.name.clone(),
                number: dto.number.clone(),
                cvc_enc: self.cipher.encrypt(&dto.cvc)?,
                expiration: dto.expiration,
                password_enc: self.cipher.encrypt(&dto.password)?,
                is_credit: dto.is_credit,
                is_debit: dto.is_debit,
            })
            .await?;
        info!(card_id = %row.id, "card created");
        self.decrypt(row)
    }

    pub async fn list_all(&self, owner_id: &str) -> Result<Vec<Card>, VaultError> {
        let rows = self.store.find_all_cards_by_owner(owner_id).await?;
        rows.into_iter().map(|row| self.decrypt(row)).collect()
    }

    pub async fn get_one(&self, id: &str, owner_id: &str) -> Result<Card, VaultError> {
        let row = self.owned(id, owner_id).await?;
        self.decrypt(row)
    }

    /// Update fields of an owned card; supplied secrets are re-encrypted,
    /// absent fields stay untouched.
    pub async fn update(
        &self,
        id: &str,
        dto: &UpdateCard,
        owner_id: &str,
    ) -> Result<Card, VaultError> {
        self.owned(id, owner_id).await?;
        let patch = CardPatch {
            title: dto.title.clone(),
            name: dto.name.clone(),
            number: dto.number.clone(),
            cvc_enc: dto
                .cvc
                .as_deref()
                .map(|c| self.cipher.encrypt(c))
                .transpose()?,
            expiration: dto.expiration,
            password_enc: dto
                .password
                .as_deref()
                .map(|p| self.cipher.encrypt(p))
                .transpose()?,
            is_credit: dto.is_credit,
            is_debit: dto.is_debit,
        };
        let row = self.store.update_card_by_id(id, patch).await?;
        self.decrypt(row)
    }

    pub async fn remove(&self, id: &str, owner_id: &str) -> Result<(), VaultError> {
        self.owned(id, owner_id).await?;
        self.store.delete_card_by_id(id).await?;
        Ok(())
    }

    /// Unconditional owner-scoped bulk delete. Reserved for account
    /// erasure; never exposed to end users directly.
    pub async fn delete_all_for_owner(&self, owner_id: &str) -> Result<u64, VaultError> {
        Ok(self.store.delete_cards_by_owner(owner_id).await?)
    }

    /// Fetch by id alone, then enforce ownership: absent is NotFound,
    /// present-but-foreign is Forbidden. The distinction is deliberate.
    async fn owned(&self, id: &str, owner_id: &str) -> Result<CardRow, VaultError> {
        let Some(row) = self.store.find_card_by_id(id).await? else {
            return Err(VaultError::NotFound("card not found".into()));
        };
        if row.user_id != owner_id {
            return Err(VaultError::Forbidden(
                "this card does not belong to you".into(),
            ));
        }
        Ok(row)
    }

    /// Decrypt at the read boundary; nothing caches the plaintext.
    fn decrypt(&self, row: CardRow) -> Result<Card, VaultError> {
        Ok(Card {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            name: row.name,
            number: row.number,
            cvc: self.cipher.decrypt(&row.cvc_enc)?,
            expiration: row.expiration,
            password: self.cipher.decrypt(&row.password_enc)?,
            is_credit: row.is_credit,
            is_debit: row.is_debit,
        })
    }
}
