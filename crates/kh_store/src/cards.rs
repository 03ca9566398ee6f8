//! Card rows: payment cards, one per (owner, title).

use crate::error::StoreError;
use crate::models::{CardPatch, CardRow, NewCard};
use crate::Store;

impl Store {
    pub async fn insert_card(&self, new: NewCard) -> Result<CardRow, StoreError> {
        sqlx::query(
            "INSERT INTO cards (id, user_id, title, name, number, cvc_enc, expiration, \
                                password_enc, is_credit, is_debit) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.id)
        .bind(&new.user_id)
        .bind(&new.title)
        .bind(&new.name)
        .bind(&new.number)
        .bind(&new.cvc_enc)
        .bind(new.expiration)
        .bind(&new.password_enc)
        .bind(new.is_credit)
        .bind(new.is_debit)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, CardRow>("SELECT * FROM cards WHERE id = ?")
            .bind(&new.id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch by id alone; ownership is checked by the caller.
    pub async fn find_card_by_id(&self, id: &str) -> Result<Option<CardRow>, StoreError> {
        let row = sqlx::query_as::<_, CardRow>("SELECT * FROM cards WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Compound-key lookup backing the per-owner title uniqueness check.
    pub async fn find_card_by_title(
        &self,
        title: &str,
        user_id: &str,
    ) -> Result<Option<CardRow>, StoreError> {
        let row =
            sqlx::query_as::<_, CardRow>("SELECT * FROM cards WHERE title = ? AND user_id = ?")
                .bind(title)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn find_all_cards_by_owner(&self, user_id: &str) -> Result<Vec<CardRow>, StoreError> {
        let rows = sqlx::query_as::<_, CardRow>(
            "SELECT * FROM cards WHERE user_id = ? ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Partial update: absent patch fields leave columns untouched.
    pub async fn update_card_by_id(
        &self,
        id: &str,
        patch: CardPatch,
    ) -> Result<CardRow, StoreError> {
        sqlx::query(
            "UPDATE cards SET \
                 title = COALESCE(?, title), \
                 name = COALESCE(?, name), \
                 number = COALESCE(?, number), \
                 cvc_enc = COALESCE(?, cvc_enc), \
                 expiration = COALESCE(?, expiration), \
                 password_enc = COALESCE(?, password_enc), \
                 is_credit = COALESCE(?, is_credit), \
                 is_debit = COALESCE(?, is_debit), \
                 updated_at = datetime('now') \
             WHERE id = ?",
        )
        .bind(&patch.title)
        .bind(&patch.name)
        .bind(&patch.number)
        .bind(&patch.cvc_enc)
        .bind(patch.expiration)
        .bind(&patch.password_enc)
        .bind(patch.is_credit)
        .bind(patch.is_debit)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, CardRow>("SELECT * FROM cards WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete_card_by_id(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Owner-scoped bulk delete. Returns the number of rows removed.
    pub async fn delete_cards_by_owner(&self, user_id: &str) -> Result<u64, StoreError> {
        let done = sqlx::query("DELETE FROM cards WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }

    pub async fn count_cards_by_owner(&self, user_id: &str) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
