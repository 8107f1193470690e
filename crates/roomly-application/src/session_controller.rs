//! Session lifecycle controller.
//!
//! Owns the in-memory session state, restores it from the credential store
//! at startup, and exposes the gating reads the navigation layer uses to
//! choose a screen tree. Only this controller mutates the session, and every
//! mutation fully replaces the prior value.

use std::sync::Arc;

use roomly_core::api::{MarketplaceApi, SignUpRequest};
use roomly_core::error::{Result, RoomlyError};
use roomly_core::session::{CredentialStore, Session, SessionState};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Everything the sign-up form collects.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub email: String,
    pub username: String,
    pub description: String,
    pub password: String,
    pub confirm_password: String,
}

/// The session state machine: `Bootstrapping` once at startup, then
/// `Anonymous` or `Authenticated` for the rest of the process lifetime.
///
/// The store and the remote API are injected so consumers share one
/// controller by reference instead of recreating session state ad hoc.
pub struct SessionController {
    state: RwLock<SessionState>,
    store: Arc<dyn CredentialStore>,
    api: Arc<dyn MarketplaceApi>,
}

impl SessionController {
    /// Creates a controller in the `Bootstrapping` state.
    pub fn new(api: Arc<dyn MarketplaceApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            state: RwLock::new(SessionState::Bootstrapping),
            store,
            api,
        }
    }

    /// Restores the persisted session, resolving to `Anonymous` or
    /// `Authenticated`.
    ///
    /// Runs exactly once per process: `Bootstrapping` is never re-entered,
    /// and a second call is a logged no-op. A store that fails to load
    /// degrades to `Anonymous` rather than blocking startup.
    pub async fn bootstrap(&self) {
        {
            let state = self.state.read().await;
            if !state.is_loading() {
                warn!("bootstrap called after session state was already resolved; ignoring");
                return;
            }
        }

        let restored = match self.store.load().await {
            Ok(restored) => restored,
            Err(err) => {
                warn!(error = %err, "failed to restore persisted session; starting anonymous");
                None
            }
        };

        let mut state = self.state.write().await;
        *state = match restored {
            Some(session) => {
                info!(user_id = %session.user_id(), "restored persisted session");
                SessionState::Authenticated(session)
            }
            None => SessionState::Anonymous,
        };
    }

    /// Signs in with the given credentials.
    ///
    /// # Errors
    ///
    /// `Validation` when a field is empty (checked before any network call),
    /// `AuthInvalid` when the server rejects the credentials, `Server` for
    /// any other remote failure. On error the session state is untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(RoomlyError::validation("Please fill all fields"));
        }

        let session = self.api.log_in(email, password).await?;
        self.establish(session).await;
        Ok(())
    }

    /// Creates an account and signs into it.
    ///
    /// # Errors
    ///
    /// `Validation` when a field is empty or the passwords differ,
    /// `Conflict` for a duplicate email/username, `Server` otherwise.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<()> {
        let required = [
            &form.email,
            &form.username,
            &form.description,
            &form.password,
            &form.confirm_password,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(RoomlyError::validation("Please fill all fields"));
        }
        if form.password != form.confirm_password {
            return Err(RoomlyError::validation("Passwords must be the same"));
        }

        let request = SignUpRequest {
            email: form.email.clone(),
            username: form.username.clone(),
            description: form.description.clone(),
            password: form.password.clone(),
        };
        let session = self.api.sign_up(&request).await?;
        self.establish(session).await;
        Ok(())
    }

    /// Explicit log-out. Always resolves to `Anonymous`.
    pub async fn log_out(&self) {
        info!("logging out");
        self.drop_session().await;
    }

    /// A dependent operation reported that the credential was rejected:
    /// drop the session so the navigation gate falls back to the
    /// sign-in tree.
    pub async fn invalidate(&self) {
        let was_authenticated = {
            let state = self.state.read().await;
            state.is_authenticated()
        };
        if was_authenticated {
            warn!("credential rejected by a dependent operation; dropping session");
            self.drop_session().await;
        }
    }

    /// True while the persisted credential is still being restored.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading()
    }

    /// True when a session is held. Meaningful once loading is over.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// The current session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.state.read().await.session().cloned()
    }

    /// Replaces the session in memory, then persists it. Persistence
    /// failure is degraded behavior: the in-memory session is the source of
    /// truth for the current process.
    async fn establish(&self, session: Session) {
        {
            let mut state = self.state.write().await;
            *state = SessionState::Authenticated(session.clone());
        }
        if let Err(err) = self.store.save(&session).await {
            warn!(error = %err, "failed to persist session; keeping in-memory session");
        }
    }

    /// Drops the in-memory session and clears the persisted copy
    /// best-effort. A failed clear leaves stale data on disk; the partial
    /// pair handling in the store keeps that harmless.
    async fn drop_session(&self) {
        {
            let mut state = self.state.write().await;
            *state = SessionState::Anonymous;
        }
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear persisted session");
        }
    }
}

#[cfg(test)]
#[path = "session_controller_test.rs"]
mod tests;
