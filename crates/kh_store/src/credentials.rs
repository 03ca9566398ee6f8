//! Credential rows: one login secret per (owner, title).

use crate::error::StoreError;
use crate::models::{CredentialPatch, CredentialRow, NewCredential};
use crate::Store;

impl Store {
    pub async fn insert_credential(
        &self,
        new: NewCredential,
    ) -> Result<CredentialRow, StoreError> {
        sqlx::query(
            "INSERT INTO credentials (id, user_id, title, url, username, password_enc) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.id)
        .bind(&new.user_id)
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.username)
        .bind(&new.password_enc)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, CredentialRow>("SELECT * FROM credentials WHERE id = ?")
            .bind(&new.id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch by id alone; ownership is checked by the caller.
    pub async fn find_credential_by_id(
        &self,
        id: &str,
    ) -> Result<Option<CredentialRow>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>("SELECT * FROM credentials WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Compound-key lookup backing the per-owner title uniqueness check.
    pub async fn find_credential_by_title(
        &self,
        title: &str,
        user_id: &str,
    ) -> Result<Option<CredentialRow>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT * FROM credentials WHERE title = ? AND user_id = ?",
        )
        .bind(title)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_all_credentials_by_owner(
        &self,
        user_id: &str,
    ) -> Result<Vec<CredentialRow>, StoreError> {
        let rows = sqlx::query_as::<_, CredentialRow>(
            "SELECT * FROM credentials WHERE user_id = ? ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Partial update: absent patch fields leave columns untouched.
    pub async fn update_credential_by_id(
        &self,
        id: &str,
        patch: CredentialPatch,
    ) -> Result<CredentialRow, StoreError> {
        sqlx::query(
            "UPDATE credentials SET \
                 title = COALESCE(?, title), \
                 url = COALESCE(?, url), \
                 username = COALESCE(?, username), \
                 password_enc = COALESCE(?, password_enc), \
                 updated_at = datetime('now') \
             WHERE id = ?",
        )
        .bind(&patch.title)
        .bind(&patch.url)
        .bind(&patch.username)
        .bind(&patch.password_enc)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, CredentialRow>("SELECT * FROM credentials WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete_credential_by_id(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM credentials WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Owner-scoped bulk delete. Returns the number of rows removed.
    pub async fn delete_credentials_by_owner(&self, user_id: &str) -> Result<u64, StoreError> {
        let done = sqlx::query("DELETE FROM credentials WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }

    pub async fn count_credentials_by_owner(&self, user_id: &str) -> Result<i64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM credentials WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
