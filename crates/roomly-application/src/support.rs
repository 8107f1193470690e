//! Test doubles for the application services: a scriptable remote API and
//! an in-memory credential store with injectable failures.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use roomly_core::api::{MarketplaceApi, SignUpRequest};
use roomly_core::error::{Result, RoomlyError};
use roomly_core::listing::Room;
use roomly_core::profile::{AvatarSource, Profile, ProfileFields};
use roomly_core::session::{CredentialStore, Session};

/// Scriptable [`MarketplaceApi`]: each endpoint pops its next queued result
/// and counts its calls. An unscripted call fails loudly.
#[derive(Default)]
pub struct MockApi {
    pub log_in_results: Mutex<VecDeque<Result<Session>>>,
    pub sign_up_results: Mutex<VecDeque<Result<Session>>>,
    pub profile_results: Mutex<VecDeque<Result<Profile>>>,
    pub update_results: Mutex<VecDeque<Result<ProfileFields>>>,
    pub upload_results: Mutex<VecDeque<Result<String>>>,
    pub log_in_calls: AtomicUsize,
    pub sign_up_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
}

impl MockApi {
    pub fn push_log_in(&self, result: Result<Session>) {
        self.log_in_results.lock().unwrap().push_back(result);
    }

    pub fn push_sign_up(&self, result: Result<Session>) {
        self.sign_up_results.lock().unwrap().push_back(result);
    }

    pub fn push_profile(&self, result: Result<Profile>) {
        self.profile_results.lock().unwrap().push_back(result);
    }

    pub fn push_update(&self, result: Result<ProfileFields>) {
        self.update_results.lock().unwrap().push_back(result);
    }

    pub fn push_upload(&self, result: Result<String>) {
        self.upload_results.lock().unwrap().push_back(result);
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T>>>) -> Result<T> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RoomlyError::server("no scripted response")))
    }
}

#[async_trait]
impl MarketplaceApi for MockApi {
    async fn log_in(&self, _email: &str, _password: &str) -> Result<Session> {
        self.log_in_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.log_in_results)
    }

    async fn sign_up(&self, _request: &SignUpRequest) -> Result<Session> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.sign_up_results)
    }

    async fn fetch_profile(&self, _session: &Session) -> Result<Profile> {
        Self::next(&self.profile_results)
    }

    async fn update_profile(
        &self,
        _session: &Session,
        _fields: &ProfileFields,
    ) -> Result<ProfileFields> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.update_results)
    }

    async fn upload_avatar(&self, _session: &Session, _avatar: &AvatarSource) -> Result<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.upload_results)
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        Err(RoomlyError::server("no scripted response"))
    }

    async fn room(&self, _id: &str) -> Result<Room> {
        Err(RoomlyError::server("no scripted response"))
    }

    async fn rooms_around(&self, _latitude: f64, _longitude: f64) -> Result<Vec<Room>> {
        Err(RoomlyError::server("no scripted response"))
    }
}

/// In-memory [`CredentialStore`] whose load/save/clear can each be made to
/// fail.
#[derive(Default)]
pub struct MemoryCredentialStore {
    pub stored: Mutex<Option<(String, String)>>,
    pub fail_load: AtomicBool,
    pub fail_save: AtomicBool,
    pub fail_clear: AtomicBool,
}

impl MemoryCredentialStore {
    pub fn with_pair(token: &str, user_id: &str) -> Self {
        let store = Self::default();
        *store.stored.lock().unwrap() = Some((token.to_string(), user_id.to_string()));
        store
    }

    pub fn stored_pair(&self) -> Option<(String, String)> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn save(&self, session: &Session) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(RoomlyError::persistence("save failed"));
        }
        *self.stored.lock().unwrap() =
            Some((session.token().to_string(), session.user_id().to_string()));
        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(RoomlyError::persistence("load failed"));
        }
        match self.stored.lock().unwrap().clone() {
            Some((token, user_id)) => Ok(Some(Session::new(token, user_id)?)),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(RoomlyError::persistence("clear failed"));
        }
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

/// A profile as the server would return it.
pub fn sample_profile() -> Profile {
    Profile {
        fields: ProfileFields {
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            description: "Analyst".to_string(),
        },
        photo_url: Some("https://cdn/avatars/ada.jpg".to_string()),
    }
}
