//! kh_vault: the Keyhaven secret-ownership core
//!
//! Services over `kh_store` and `kh_crypto`:
//! - `identity`:    user records (login passwords one-way hashed)
//! - `session`:     sign-up / sign-in / bearer authentication
//! - `credentials`: login secrets, password encrypted at rest
//! - `cards`:       payment cards, cvc and password encrypted at rest
//! - `notes`:       plaintext notes
//! - `erase`:       password-confirmed account teardown
//!
//! Everything is wired once at startup through [`Keyhaven::open`]: one
//! store pool, one reversible cipher, one password hasher, one token
//! signer, shared by every service. Vault records are scoped to their
//! owner on every read and write; encrypted fields are decrypted only at
//! the read boundary, for the owner, never cached.

pub mod cards;
pub mod config;
pub mod credentials;
pub mod erase;
pub mod error;
pub mod identity;
pub mod notes;
pub mod session;

pub use config::Config;
pub use error::{VaultError, UNAUTHENTICATED_MSG};
pub use session::AuthenticatedUser;

use std::path::Path;

use kh_crypto::{Cipher, PasswordHasher, TokenKeys};
use kh_store::Store;

use cards::CardsVault;
use credentials::CredentialsVault;
use erase::EraseService;
use identity::IdentityService;
use notes::NotesVault;
use session::SessionService;

/// Fully wired service registry. Cheap to clone; every handle shares the
/// same pool and key material.
#[derive(Clone)]
pub struct Keyhaven {
    pub identity: IdentityService,
    pub session: SessionService,
    pub credentials: CredentialsVault,
    pub cards: CardsVault,
    pub notes: NotesVault,
    pub erase: EraseService,
}

impl Keyhaven {
    /// Open the store and construct every service.
    ///
    /// Fails when a secret is missing or unusable: a half-configured
    /// process must refuse to serve vault operations rather than degrade.
    pub async fn open(db_path: &Path, config: &Config) -> Result<Self, VaultError> {
        let store = Store::open(db_path).await?;
        let cipher = Cipher::new(&config.cipher_secret)?;
        let hasher = PasswordHasher::new(config.hash_cost)?;
        let tokens = TokenKeys::new(&config.token_secret)?;

        let identity = IdentityService::new(store.clone(), hasher.clone());
        let session = SessionService::new(identity.clone(), hasher, tokens);
        let credentials = CredentialsVault::new(store.clone(), cipher.clone());
        let cards = CardsVault::new(store.clone(), cipher);
        let notes = NotesVault::new(store);
        let erase = EraseService::new(
            session.clone(),
            identity.clone(),
            credentials.clone(),
            notes.clone(),
            cards.clone(),
        );

        Ok(Self {
            identity,
            session,
            credentials,
            cards,
            notes,
            erase,
        })
    }
}
