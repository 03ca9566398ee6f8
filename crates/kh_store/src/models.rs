//! Database row models and write payloads.
//!
//! Row structs map SQL rows one to one. Columns ending in `_enc` hold
//! cipher output; decryption happens in the service layer at the read
//! boundary, never here.

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2id PHC digest of the login password. Never echoed to callers.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CredentialRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub username: String,
    /// Encrypted login password.
    pub password_enc: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CardRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// Printed cardholder name.
    pub name: String,
    pub number: String,
    /// Encrypted card verification code.
    pub cvc_enc: String,
    pub expiration: NaiveDate,
    /// Encrypted card password.
    pub password_enc: String,
    pub is_credit: bool,
    pub is_debit: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Write payloads ───────────────────────────────────────────────────────────
// Inserts carry every required column; timestamps come from the schema
// defaults. Patches update only the fields that are Some.

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewCredential {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub username: String,
    pub password_enc: String,
}

#[derive(Debug, Clone, Default)]
pub struct CredentialPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password_enc: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub name: String,
    pub number: String,
    pub cvc_enc: String,
    pub expiration: NaiveDate,
    pub password_enc: String,
    pub is_credit: bool,
    pub is_debit: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub name: Option<String>,
    pub number: Option<String>,
    pub cvc_enc: Option<String>,
    pub expiration: Option<NaiveDate>,
    pub password_enc: Option<String>,
    pub is_credit: Option<bool>,
    pub is_debit: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub text: Option<String>,
}
