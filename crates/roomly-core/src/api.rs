//! Remote marketplace API port.
//!
//! Defines the contract the core depends on; the HTTP implementation lives
//! in the client crate.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::listing::Room;
use crate::profile::{AvatarSource, Profile, ProfileFields};
use crate::session::Session;

/// Everything a new account needs.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub username: String,
    pub description: String,
    pub password: String,
}

/// The remote marketplace API the core consumes.
///
/// Implementations classify every transport failure into a [`RoomlyError`]
/// variant before returning; no raw transport error crosses this boundary.
///
/// [`RoomlyError`]: crate::error::RoomlyError
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// `AuthInvalid` on rejected credentials, `Server` otherwise.
    async fn log_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Creates an account and returns its session.
    ///
    /// # Errors
    ///
    /// `Conflict` when the server reports a duplicate email or username,
    /// `Server` otherwise.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<Session>;

    /// Fetches the authoritative profile of the session's user.
    async fn fetch_profile(&self, session: &Session) -> Result<Profile>;

    /// Replaces the profile's text fields with the given values.
    ///
    /// The full current value of every tracked field is sent; the server may
    /// normalize and returns the values to adopt as the new source of truth.
    async fn update_profile(
        &self,
        session: &Session,
        fields: &ProfileFields,
    ) -> Result<ProfileFields>;

    /// Uploads a new avatar image and returns its hosted URL.
    async fn upload_avatar(&self, session: &Session, avatar: &AvatarSource) -> Result<String>;

    /// Lists all rooms.
    async fn rooms(&self) -> Result<Vec<Room>>;

    /// Fetches a single room by id.
    async fn room(&self, id: &str) -> Result<Room>;

    /// Lists rooms around a coordinate.
    async fn rooms_around(&self, latitude: f64, longitude: f64) -> Result<Vec<Room>>;
}
