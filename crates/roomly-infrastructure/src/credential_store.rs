//! File-backed credential store.
//!
//! Persists the session credential as two key files (`token`, `user_id`)
//! under the Roomly config directory, mirroring the two-key layout of the
//! device keystore it replaces.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use roomly_core::error::{Result, RoomlyError};
use roomly_core::session::{CredentialStore, Session};
use tracing::warn;

use crate::paths::RoomlyPaths;

const TOKEN_FILE: &str = "token";
const USER_ID_FILE: &str = "user_id";

/// Credential store backed by plain key files.
///
/// The medium offers no pair-atomicity, so writes are ordered: the token is
/// written first and the user id only after that write succeeds; removal runs
/// in the reverse order. A crash between the two leaves a partial pair which
/// [`load`](CredentialStore::load) reports as absent and disposes of.
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store at the default credentials directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be resolved.
    pub fn default() -> Result<Self> {
        Self::new(None)
    }

    /// Creates a store rooted at a custom base directory (for testing).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let dir = RoomlyPaths::new(base_dir).credentials_dir()?;
        Ok(Self { dir })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_id_path(&self) -> PathBuf {
        self.dir.join(USER_ID_FILE)
    }

    /// Reads one key file, mapping "missing" and "empty" both to `None`.
    async fn read_key(&self, path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(value) => {
                let value = value.trim().to_string();
                Ok(if value.is_empty() { None } else { Some(value) })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(RoomlyError::persistence(format!(
                "Failed to read {}: {}",
                path.display(),
                err
            ))),
        }
    }

    /// Best-effort removal of one key file; only logs on failure.
    async fn discard_key(&self, path: &Path) {
        if let Err(err) = tokio::fs::remove_file(path).await {
            if err.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), error = %err, "failed to discard stray credential key");
            }
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn save(&self, session: &Session) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|err| {
            RoomlyError::persistence(format!(
                "Failed to create {}: {}",
                self.dir.display(),
                err
            ))
        })?;

        // Token first: a crash here leaves a lone token, which load() treats
        // as absent.
        tokio::fs::write(self.token_path(), session.token())
            .await
            .map_err(|err| RoomlyError::persistence(format!("Failed to write token: {}", err)))?;

        tokio::fs::write(self.user_id_path(), session.user_id())
            .await
            .map_err(|err| RoomlyError::persistence(format!("Failed to write user id: {}", err)))
    }

    async fn load(&self) -> Result<Option<Session>> {
        let token = self.read_key(&self.token_path()).await?;
        let user_id = self.read_key(&self.user_id_path()).await?;

        match (token, user_id) {
            (Some(token), Some(user_id)) => Ok(Some(Session::new(token, user_id)?)),
            (None, None) => Ok(None),
            // Partial pair: never surface it. Dispose of the stray key so
            // the next load starts clean.
            (Some(_), None) => {
                warn!("found token without user id; treating persisted session as absent");
                self.discard_key(&self.token_path()).await;
                Ok(None)
            }
            (None, Some(_)) => {
                warn!("found user id without token; treating persisted session as absent");
                self.discard_key(&self.user_id_path()).await;
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        // Reverse of the save order: the user id goes first so an
        // interrupted clear cannot leave a lone user id paired later with a
        // fresh token.
        for path in [self.user_id_path(), self.token_path()] {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(RoomlyError::persistence(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        err
                    )));
                }
            }
        }
        Ok(())
    }
}
