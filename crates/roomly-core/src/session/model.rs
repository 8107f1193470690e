//! Session domain model.
//!
//! The in-memory pairing of an auth credential and a user identifier that
//! gates access to authenticated screens.

use crate::error::{Result, RoomlyError};

/// An authenticated session: a bearer token paired with the user it belongs to.
///
/// The fields are private so the invariant holds at the type level: a
/// `Session` always carries both a non-empty token and a non-empty user id.
/// There is no such thing as a partial session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user_id: String,
}

impl Session {
    /// Creates a session from a token/user-id pair.
    ///
    /// Each value is validated independently: both must be non-empty after
    /// trimming. (The check is an explicit logical AND on both fields, not
    /// a truthiness shortcut over the pair.)
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if either value is empty or whitespace.
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let user_id = user_id.into();

        if token.trim().is_empty() || user_id.trim().is_empty() {
            return Err(RoomlyError::validation(
                "A session requires both a token and a user id",
            ));
        }

        Ok(Self { token, user_id })
    }

    /// The opaque bearer token authorizing remote calls.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The identifier of the signed-in user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// The three states a process-wide session can be in.
///
/// `Bootstrapping` is entered exactly once, at process start, and is left
/// for good once the persisted credential has been checked. The navigation
/// layer reads this state to decide which screen tree to mount and renders
/// nothing while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup: the persisted credential has not been checked yet.
    Bootstrapping,
    /// No valid session; only the sign-in/sign-up tree is reachable.
    Anonymous,
    /// A full session is held; the authenticated tree is reachable.
    Authenticated(Session),
}

impl SessionState {
    /// True while the persisted credential is still being restored.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Bootstrapping)
    }

    /// True when a session is held. Only meaningful once loading is over.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
