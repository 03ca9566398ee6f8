//! Notes vault: plaintext notes scoped to their owner.
//!
//! Notes carry no recoverable secret, so no cipher is involved; ownership
//! rules are identical to the other vaults.

use kh_store::models::{NewNote, NotePatch, NoteRow};
use kh_store::Store;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::VaultError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub text: String,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            text: row.text,
        }
    }
}

#[derive(Clone)]
pub struct NotesVault {
    store: Store,
}

impl NotesVault {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a note. The title pre-check gives a friendly Conflict; the
    /// UNIQUE(user_id, title) constraint settles any race.
    pub async fn create(&self, dto: &CreateNote, owner_id: &str) -> Result<Note, VaultError> {
        if self
            .store
            .find_note_by_title(&dto.title, owner_id)
            .await?
            .is_some()
        {
            return Err(VaultError::Conflict("note title already exists".into()));
        }
        let row = self
            .store
            .insert_note(NewNote {
                id: Uuid::new_v4().to_string(),
                user_id: owner_id.to_string(),
                title: dto.title.clone(),
                text: dto.text.clone(),
            })
            .await?;
        info!(note_id = %row.id, "note created");
        Ok(row.into())
    }

    pub async fn list_all(&self, owner_id: &str) -> Result<Vec<Note>, VaultError> {
        let rows = self.store.find_all_notes_by_owner(owner_id).await?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    pub async fn get_one(&self, id: &str, owner_id: &str) -> Result<Note, VaultError> {
        let row = self.owned(id, owner_id).await?;
        Ok(row.into())
    }

    pub async fn update(
        &self,
        id: &str,
        dto: &UpdateNote,
        owner_id: &str,
    ) -> Result<Note, VaultError> {
        self.owned(id, owner_id).await?;
        let patch = NotePatch {
            title: dto.title.clone(),
            text: dto.text.clone(),
        };
        let row = self.store.update_note_by_id(id, patch).await?;
        Ok(row.into())
    }

    pub async fn remove(&self, id: &str, owner_id: &str) -> Result<(), VaultError> {
        self.owned(id, owner_id).await?;
        self.store.delete_note_by_id(id).await?;
        Ok(())
    }

    /// Unconditional owner-scoped bulk delete. Reserved for account
    /// erasure; never exposed to end users directly.
    pub async fn delete_all_for_owner(&self, owner_id: &str) -> Result<u64, VaultError> {
        Ok(self.store.delete_notes_by_owner(owner_id).await?)
    }

    /// Fetch by id alone, then enforce ownership: absent is NotFound,
    /// present-but-foreign is Forbidden. The distinction is deliberate.
    async fn owned(&self, id: &str, owner_id: &str) -> Result<NoteRow, VaultError> {
        let Some(row) = self.store.find_note_by_id(id).await? else {
            return Err(VaultError::NotFound("note not found".into()));
        };
        if row.user_id != owner_id {
            return Err(VaultError::Forbidden(
                "this note does not belong to you".into(),
            ));
        }
        Ok(row)
    }
}
