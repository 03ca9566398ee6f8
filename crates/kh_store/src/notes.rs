//! Note rows: plaintext notes, one per (owner, title).

use crate::error::StoreError;
use crate::models::{NewNote, NotePatch, NoteRow};
use crate::Store;

impl Store {
    pub async fn insert_note(&self, new: NewNote) -> Result<NoteRow, StoreError> {
        sqlx::query("INSERT INTO notes (id, user_id, title, text) VALUES (?, ?, ?, ?)")
            .bind(&new.id)
            .bind(&new.user_id)
            .bind(&new.title)
            .bind(&new.text)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<_, NoteRow>("SELECT * FROM notes WHERE id = ?")
            .bind(&new.id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch by id alone; ownership is checked by the caller.
    pub async fn find_note_by_id(&self, id: &str) -> Result<Option<NoteRow>, StoreError> {
        let row = sqlx::query_as::<_, NoteRow>("SELECT * FROM notes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Compound-key lookup backing the per-owner title uniqueness check.
    pub async fn find_note_by_title(
        &self,
        title: &str,
        user_id: &str,
    ) -> Result<Option<NoteRow>, StoreError> {
        let row =
            sqlx::query_as::<_, NoteRow>("SELECT * FROM notes WHERE title = ? AND user_id = ?")
                .bind(title)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn find_all_notes_by_owner(&self, user_id: &str) -> Result<Vec<NoteRow>, StoreError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            "SELECT * FROM notes WHERE user_id = ? ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Partial update: absent patch fields leave columns untouched.
    pub async fn update_note_by_id(
        &self,
        id: &str,
        patch: NotePatch,
    ) -> Result<NoteRow, StoreError> {
        sqlx::query(
            "UPDATE notes SET \
                 title = COALESCE(?, title), \
                 text = COALESCE(?, text), \
                 updated_at = datetime('now') \
             WHERE id = ?",
        )
        .bind(&patch.title)
        .bind(&patch.text)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, NoteRow>("SELECT * FROM notes WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete_note_by_id(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Owner-scoped bulk delete. Returns the number of rows removed.
    pub async fn delete_notes_by_owner(&self, user_id: &str) -> Result<u64, StoreError> {
        let done = sqlx::query("DELETE FROM notes WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }

    pub async fn count_notes_by_owner(&self, user_id: &str) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
