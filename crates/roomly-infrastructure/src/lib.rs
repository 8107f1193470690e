//! On-device infrastructure for the Roomly client: path resolution, the
//! file-backed credential store, and client configuration loading.

pub mod config_service;
pub mod credential_store;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::credential_store::FileCredentialStore;
pub use crate::paths::RoomlyPaths;
