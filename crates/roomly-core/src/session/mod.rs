//! Session domain: the in-memory session model and its persistence port.

pub mod model;
pub mod store;

pub use model::{Session, SessionState};
pub use store::CredentialStore;
