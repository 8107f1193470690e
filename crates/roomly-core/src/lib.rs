//! Domain core of the Roomly marketplace client.
//!
//! Holds the session and profile models, the error taxonomy, and the ports
//! (credential store, remote API) that the outer crates implement. No I/O
//! happens here.

pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod profile;
pub mod session;

// Re-export common error type
pub use error::{Result, RoomlyError};
