//! Profile synchronization engine.
//!
//! Converts a locally edited profile draft into zero, one, or two remote
//! mutations (avatar upload, text field update) and merges their results
//! into one user-visible outcome. The two sub-operations are independent:
//! an avatar failure never prevents the text update from being issued.

use std::sync::Arc;

use roomly_core::api::MarketplaceApi;
use roomly_core::error::{Result, RoomlyError};
use roomly_core::profile::{
    AvatarSource, Profile, ProfileEditOutcome, ProfileEditRequest, ProfileFields, SubOutcome,
};
use tracing::{debug, info};

use crate::session_controller::SessionController;

/// The in-edit state of the profile screen: current field values, the
/// displayed picture, and what has been modified since the last sync.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    fields: ProfileFields,
    photo_url: Option<String>,
    pending_avatar: Option<AvatarSource>,
    text_modified: bool,
}

impl ProfileDraft {
    /// Starts a draft from the authoritative profile.
    pub fn from_profile(profile: Profile) -> Self {
        Self {
            fields: profile.fields,
            photo_url: profile.photo_url,
            pending_avatar: None,
            text_modified: false,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
        self.text_modified = true;
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.fields.username = username.into();
        self.text_modified = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.description = description.into();
        self.text_modified = true;
    }

    /// Records a newly picked avatar image to be uploaded on next submit.
    pub fn pick_avatar(&mut self, avatar: AvatarSource) {
        self.pending_avatar = Some(avatar);
    }

    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    /// URL of the currently displayed picture.
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn is_text_modified(&self) -> bool {
        self.text_modified
    }

    pub fn has_pending_avatar(&self) -> bool {
        self.pending_avatar.is_some()
    }

    /// What the next submit would send: each side present only if modified.
    pub fn edit_request(&self) -> ProfileEditRequest {
        ProfileEditRequest {
            text_fields: self.text_modified.then(|| self.fields.clone()),
            avatar: self.pending_avatar.clone(),
        }
    }

    fn confirm_photo(&mut self, url: String) {
        self.photo_url = Some(url);
        self.pending_avatar = None;
    }

    fn adopt_fields(&mut self, fields: ProfileFields) {
        self.fields = fields;
        self.text_modified = false;
    }
}

/// Orchestrates profile edits against the remote API, using the session
/// controller for the credential and for reporting rejected credentials.
pub struct ProfileSyncEngine {
    api: Arc<dyn MarketplaceApi>,
    session: Arc<SessionController>,
}

impl ProfileSyncEngine {
    pub fn new(api: Arc<dyn MarketplaceApi>, session: Arc<SessionController>) -> Self {
        Self { api, session }
    }

    /// Fetches the authoritative profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// `AuthInvalid` when no session is held or the credential was rejected
    /// (the session is dropped in the latter case), `Server` otherwise.
    pub async fn load_profile(&self) -> Result<Profile> {
        let session = self
            .session
            .current_session()
            .await
            .ok_or(RoomlyError::AuthInvalid)?;

        match self.api.fetch_profile(&session).await {
            Ok(profile) => Ok(profile),
            Err(err) => {
                self.note_auth_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Submits the draft's modifications as up to two independent remote
    /// mutations, avatar first, and merges the results.
    ///
    /// A sub-operation that succeeds is absorbed into the draft (confirmed
    /// picture URL, server-normalized field values) and its modified state
    /// cleared; a failed sub-operation keeps its modified state so a
    /// resubmission retries only what is still pending.
    ///
    /// # Errors
    ///
    /// `NothingToSync` when the draft has no modifications: rejected before
    /// any network call. `AuthInvalid` when no session is held. Remote
    /// failures do not error: they are recorded per sub-operation in the
    /// returned outcome.
    pub async fn submit(&self, draft: &mut ProfileDraft) -> Result<ProfileEditOutcome> {
        let request = draft.edit_request();
        if request.is_empty() {
            return Err(RoomlyError::NothingToSync);
        }

        let session = self
            .session
            .current_session()
            .await
            .ok_or(RoomlyError::AuthInvalid)?;

        let mut outcome = ProfileEditOutcome::default();

        // Avatar first: the merge tie-break reports the first failure in
        // issue order, so the order must be deterministic.
        if let Some(avatar) = &request.avatar {
            match self.api.upload_avatar(&session, avatar).await {
                Ok(url) => {
                    debug!(url = %url, "avatar upload confirmed");
                    draft.confirm_photo(url.clone());
                    outcome.avatar = SubOutcome::Succeeded(url);
                }
                Err(err) => {
                    self.note_auth_failure(&err).await;
                    outcome.avatar = SubOutcome::Failed(err.user_message());
                }
            }
        }

        if let Some(fields) = &request.text_fields {
            match self.api.update_profile(&session, fields).await {
                Ok(server_fields) => {
                    draft.adopt_fields(server_fields.clone());
                    outcome.text = SubOutcome::Succeeded(server_fields);
                }
                Err(err) => {
                    self.note_auth_failure(&err).await;
                    outcome.text = SubOutcome::Failed(err.user_message());
                }
            }
        }

        info!(
            avatar_attempted = request.avatar.is_some(),
            text_attempted = request.text_fields.is_some(),
            success = matches!(
                outcome.summary(),
                roomly_core::profile::EditSummary::Updated
            ),
            "profile edit submitted"
        );

        Ok(outcome)
    }

    async fn note_auth_failure(&self, err: &RoomlyError) {
        if err.is_auth_invalid() {
            self.session.invalidate().await;
        }
    }
}

#[cfg(test)]
#[path = "profile_sync_test.rs"]
mod tests;
