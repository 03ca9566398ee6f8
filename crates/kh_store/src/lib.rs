//! kh_store: persistent storage for Keyhaven
//!
//! Plain SQLite via sqlx. Secret columns arrive already encrypted from the
//! service layer and are stored as opaque strings; this crate never sees
//! key material. Non-secret metadata (ids, owners, titles, timestamps) is
//! stored in plaintext to allow efficient owner-scoped queries.
//!
//! SQLx migrations in `migrations/` are run on open.

pub mod db;
pub mod error;
pub mod models;

mod cards;
mod credentials;
mod notes;
mod users;

pub use db::Store;
pub use error::StoreError;
