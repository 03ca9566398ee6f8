//! Account erasure: confirm the password, then tear everything down.

use tracing::{info, warn};

use crate::cards::CardsVault;
use crate::credentials::CredentialsVault;
use crate::error::VaultError;
use crate::identity::IdentityService;
use crate::notes::NotesVault;
use crate::session::{AuthenticatedUser, SessionService};

#[derive(Clone)]
pub struct EraseService {
    session: SessionService,
    identity: IdentityService,
    credentials: CredentialsVault,
    notes: NotesVault,
    cards: CardsVault,
}

impl EraseService {
    pub fn new(
        session: SessionService,
        identity: IdentityService,
        credentials: CredentialsVault,
        notes: NotesVault,
        cards: CardsVault,
    ) -> Self {
        Self {
            session,
            identity,
            credentials,
            notes,
            cards,
        }
    }

    /// Erase the account and every secret it owns.
    ///
    /// Password re-entry is a deliberate confirmation step, independent of
    /// the bearer token that already proved identity; on failure nothing
    /// is deleted.
    ///
    /// The cascade is best-effort, not atomic: each step is an idempotent
    /// owner-scoped bulk delete and the user row goes last, so a failed
    /// intermediate step leaves the account intact and re-erasable.
    pub async fn erase(
        &self,
        supplied_password: &str,
        user: &AuthenticatedUser,
    ) -> Result<(), VaultError> {
        if let Err(e) = self.session.sign_in(&user.email, supplied_password).await {
            warn!(user_id = %user.id, "erase confirmation rejected");
            return Err(e);
        }

        self.credentials.delete_all_for_owner(&user.id).await?;
        self.notes.delete_all_for_owner(&user.id).await?;
        self.cards.delete_all_for_owner(&user.id).await?;
        self.identity.delete(&user.id).await?;

        info!(user_id = %user.id, "account erased");
        Ok(())
    }
}
