//! Configuration service implementation.
//!
//! Loads the client configuration from the configuration file
//! (~/.config/roomly/config.toml), creating it with defaults when missing.

use std::path::Path;
use std::sync::{Arc, RwLock};

use roomly_core::config::ClientConfig;
use tracing::warn;

use crate::paths::RoomlyPaths;

/// Configuration service that loads and caches the client configuration.
///
/// Reads config.toml once and caches it to avoid repeated file I/O. A
/// missing file is created with default values; an unreadable or malformed
/// file degrades to defaults with a warning, never an error.
#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<RoomlyPaths>,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service resolving against the default config directory.
    pub fn new() -> Self {
        Self::with_base_dir(None)
    }

    /// Creates a service rooted at a custom base directory (for testing).
    pub fn with_base_dir(base_dir: Option<&Path>) -> Self {
        Self {
            paths: Arc::new(RoomlyPaths::new(base_dir)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|message| {
            warn!(error = %message, "failed to load config.toml; using defaults");
            ClientConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config(&self) -> Result<ClientConfig, String> {
        let config_path = self
            .paths
            .config_file()
            .map_err(|e| format!("Failed to resolve config path: {}", e))?;

        if !config_path.exists() {
            let default_config = ClientConfig::default();
            self.write_default(&config_path, &default_config);
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read {}: {}", config_path.display(), e))?;

        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", config_path.display(), e))
    }

    /// Seeds config.toml with defaults; best-effort only.
    fn write_default(&self, config_path: &Path, config: &ClientConfig) {
        let serialized = match toml::to_string_pretty(config) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "failed to serialize default config");
                return;
            }
        };

        if let Some(parent) = config_path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(error = %err, "failed to create config directory");
                return;
            }
        }

        if let Err(err) = std::fs::write(config_path, serialized) {
            warn!(error = %err, "failed to seed default config.toml");
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
