//! Unified path management for Roomly's on-device files.
//!
//! All durable client state (credentials, configuration) lives under one
//! platform config directory so every storage implementation agrees on
//! where things are.

use std::path::{Path, PathBuf};

use roomly_core::error::{Result, RoomlyError};

/// Unified path management for the Roomly client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/roomly/            # Config directory (platform-dependent)
/// ├── config.toml              # Client configuration
/// └── credentials/             # Persisted session credential
///     ├── token
///     └── user_id
/// ```
pub struct RoomlyPaths {
    /// Base directory override, used by tests to stay out of the real
    /// config directory.
    base: Option<PathBuf>,
}

impl RoomlyPaths {
    /// Creates a path resolver, optionally rooted at a custom base directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the Roomly configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the platform config directory cannot
    /// be determined.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }

        dirs::config_dir()
            .map(|dir| dir.join("roomly"))
            .ok_or_else(|| RoomlyError::persistence("Cannot find config directory"))
    }

    /// Returns the path to the client configuration file.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding the persisted session credential.
    pub fn credentials_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("credentials"))
    }
}
