//! Application services of the Roomly client: the session lifecycle
//! controller and the profile synchronization engine.

pub mod profile_sync;
pub mod session_controller;

#[cfg(test)]
pub(crate) mod support;

pub use crate::profile_sync::{ProfileDraft, ProfileSyncEngine};
pub use crate::session_controller::{SessionController, SignUpForm};
