//! Credential store trait.
//!
//! Defines the interface for durable persistence of the session credential.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for the durable copy of the session credential.
///
/// This trait decouples the session lifecycle from the specific storage
/// mechanism (key files, platform keychain, ...). The store holds a copy of
/// the session but never mutates it on its own; only the session controller
/// drives writes.
///
/// # Implementation Notes
///
/// Implementations must never surface a partial pair: if only one of the two
/// values survives a crash, `load` must report "absent" and dispose of the
/// stray value.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Durably persists the session, replacing any prior values.
    ///
    /// When the medium cannot write the pair atomically, the user id must be
    /// written only after the token write succeeds, so a crash between the
    /// two leaves a partial pair that `load` will treat as absent.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Returns the persisted session, or `None` if either value is missing.
    async fn load(&self) -> Result<Option<Session>>;

    /// Removes both persisted values.
    ///
    /// Callers treat removal as best-effort: a failed clear leaves stale
    /// data on disk but never blocks an in-memory logout.
    async fn clear(&self) -> Result<()>;
}
