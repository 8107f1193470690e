//! HTTP implementation of the marketplace API.
//!
//! Wraps the remote REST endpoints behind the [`MarketplaceApi`] port and
//! classifies every transport failure into a [`RoomlyError`] so nothing raw
//! crosses the boundary.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, multipart};
use roomly_core::api::{MarketplaceApi, SignUpRequest};
use roomly_core::config::ClientConfig;
use roomly_core::error::{Result, RoomlyError};
use roomly_core::listing::Room;
use roomly_core::profile::{AvatarSource, Profile, ProfileFields};
use roomly_core::session::Session;
use roomly_infrastructure::ConfigService;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

/// Environment variable overriding the configured base URL.
const BASE_URL_ENV: &str = "ROOMLY_API_URL";

/// HTTP client for the marketplace API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct LogInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

#[derive(Debug, Deserialize)]
struct PhotoDto {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ProfileDto {
    email: String,
    username: String,
    #[serde(default)]
    description: String,
    photo: Option<PhotoDto>,
}

#[derive(Debug, Deserialize)]
struct PhotoEnvelope {
    photo: PhotoDto,
}

impl ProfileDto {
    fn into_fields(self) -> ProfileFields {
        ProfileFields {
            email: self.email,
            username: self.username,
            description: self.description,
        }
    }
}

impl ApiClient {
    /// Creates a client for the given configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Creates a client from config.toml and the environment.
    ///
    /// Priority: `ROOMLY_API_URL` environment variable, then
    /// ~/.config/roomly/config.toml, then the built-in default.
    pub fn from_env() -> Self {
        let mut config = ConfigService::new().get_config();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        Self::new(&config)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| RoomlyError::server(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RoomlyError::server(format!("Failed to parse response: {}", e)))
    }

    /// Turns a non-success response into the matching error variant.
    async fn classify_response(response: reqwest::Response) -> RoomlyError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorPayload>(&body)
            .ok()
            .map(|payload| payload.error);
        classify(status, message.as_deref())
    }
}

/// Maps a response status and optional server error message to the error
/// taxonomy: 401 means the credentials were rejected, a recognized
/// duplicate-account message is surfaced verbatim as a conflict, and
/// everything else is a server error with a generic user message.
fn classify(status: StatusCode, server_message: Option<&str>) -> RoomlyError {
    if status == StatusCode::UNAUTHORIZED {
        return RoomlyError::AuthInvalid;
    }

    match server_message {
        Some(message) if message.ends_with("already has an account.") => {
            RoomlyError::conflict(message)
        }
        Some(message) => RoomlyError::server(format!("{}: {}", status, message)),
        None => RoomlyError::server(format!("Request failed with status {}", status)),
    }
}

/// Derives the upload file name and mime type from the local image path.
fn avatar_file_meta(path: &Path) -> (String, String) {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("jpg");
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (format!("userPicture.{}", extension), mime.essence_str().to_string())
}

#[async_trait]
impl MarketplaceApi for ApiClient {
    async fn log_in(&self, email: &str, password: &str) -> Result<Session> {
        let response: AuthResponse = self
            .send_json(
                self.client
                    .post(self.url("/user/log_in"))
                    .json(&LogInRequest { email, password }),
            )
            .await?;
        Session::new(response.token, response.id)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Session> {
        let response: AuthResponse = self
            .send_json(self.client.post(self.url("/user/sign_up")).json(request))
            .await?;
        Session::new(response.token, response.id)
    }

    async fn fetch_profile(&self, session: &Session) -> Result<Profile> {
        let dto: ProfileDto = self
            .send_json(
                self.client
                    .get(self.url(&format!("/user/{}", session.user_id())))
                    .bearer_auth(session.token()),
            )
            .await?;

        let photo_url = dto.photo.as_ref().map(|photo| photo.url.clone());
        Ok(Profile {
            fields: dto.into_fields(),
            photo_url,
        })
    }

    async fn update_profile(
        &self,
        session: &Session,
        fields: &ProfileFields,
    ) -> Result<ProfileFields> {
        let dto: ProfileDto = self
            .send_json(
                self.client
                    .put(self.url("/user/update"))
                    .bearer_auth(session.token())
                    .json(fields),
            )
            .await?;
        Ok(dto.into_fields())
    }

    async fn upload_avatar(&self, session: &Session, avatar: &AvatarSource) -> Result<String> {
        let bytes = tokio::fs::read(avatar.path()).await.map_err(|e| {
            RoomlyError::validation(format!(
                "Unable to read the selected picture: {}",
                e
            ))
        })?;

        let (file_name, mime) = avatar_file_meta(avatar.path());
        debug!(file_name = %file_name, mime = %mime, "uploading avatar");

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime)
            .map_err(|e| RoomlyError::server(format!("Invalid upload content type: {}", e)))?;
        let form = multipart::Form::new().part("photo", part);

        let envelope: PhotoEnvelope = self
            .send_json(
                self.client
                    .put(self.url("/user/upload_picture"))
                    .bearer_auth(session.token())
                    .multipart(form),
            )
            .await?;
        Ok(envelope.photo.url)
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        self.send_json(self.client.get(self.url("/rooms"))).await
    }

    async fn room(&self, id: &str) -> Result<Room> {
        self.send_json(self.client.get(self.url(&format!("/rooms/{}", id))))
            .await
    }

    async fn rooms_around(&self, latitude: f64, longitude: f64) -> Result<Vec<Room>> {
        self.send_json(
            self.client.get(self.url("/rooms/around")).query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
            ]),
        )
        .await
    }
}
