//! User profile domain models.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The tracked text fields of a profile.
///
/// The remote update contract expects full replacement: every field is sent
/// with its complete current value, never a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub email: String,
    pub username: String,
    pub description: String,
}

/// The authoritative profile as served by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub fields: ProfileFields,
    /// URL of the current avatar picture, if one has been uploaded.
    pub photo_url: Option<String>,
}

/// A locally-selected avatar image, picked or captured on the device.
///
/// Only the local path is carried; the image bytes are read and the content
/// type inferred at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarSource {
    path: PathBuf,
}

impl AvatarSource {
    /// Wraps a device-local image path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The local path of the selected image.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
