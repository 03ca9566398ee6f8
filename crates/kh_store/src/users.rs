//! User identity rows.

use crate::error::StoreError;
use crate::models::{NewUser, UserRow};
use crate::Store;

impl Store {
    /// Insert a user.  A duplicate email surfaces as
    /// [`StoreError::UniqueViolation`].
    pub async fn insert_user(&self, new: NewUser) -> Result<UserRow, StoreError> {
        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES (?, ?, ?, ?)")
            .bind(&new.id)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password_hash)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(&new.id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRow>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete_user_by_id(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
