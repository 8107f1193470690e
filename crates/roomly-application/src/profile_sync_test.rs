use std::sync::Arc;
use std::sync::atomic::Ordering;

use roomly_core::error::RoomlyError;
use roomly_core::profile::{AvatarSource, EditSummary, ProfileFields, SubOutcome};

use super::{ProfileDraft, ProfileSyncEngine};
use crate::session_controller::SessionController;
use crate::support::{MemoryCredentialStore, MockApi, sample_profile};

async fn signed_in_engine(api: Arc<MockApi>) -> (ProfileSyncEngine, Arc<SessionController>) {
    let store = Arc::new(MemoryCredentialStore::with_pair("tok-1", "user-1"));
    let controller = Arc::new(SessionController::new(api.clone(), store));
    controller.bootstrap().await;
    (ProfileSyncEngine::new(api, controller.clone()), controller)
}

fn typed_fields() -> ProfileFields {
    ProfileFields {
        email: "ada@example.com".to_string(),
        username: "ada_typed".to_string(),
        description: "Analyst".to_string(),
    }
}

#[tokio::test]
async fn test_unmodified_draft_is_rejected_with_zero_calls() {
    let api = Arc::new(MockApi::default());
    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let mut draft = ProfileDraft::from_profile(sample_profile());

    let err = engine.submit(&mut draft).await.unwrap_err();

    assert_eq!(err, RoomlyError::NothingToSync);
    assert_eq!(err.user_message(), "Change at least one information");
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_submit_without_session_is_auth_invalid() {
    let api = Arc::new(MockApi::default());
    let store = Arc::new(MemoryCredentialStore::default());
    let controller = Arc::new(SessionController::new(api.clone(), store));
    controller.bootstrap().await;
    let engine = ProfileSyncEngine::new(api, controller);

    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_username("new_name");

    let err = engine.submit(&mut draft).await.unwrap_err();
    assert_eq!(err, RoomlyError::AuthInvalid);
}

#[tokio::test]
async fn test_text_only_success_adopts_server_values() {
    let api = Arc::new(MockApi::default());
    // Server normalizes the username.
    let server_fields = ProfileFields {
        username: "ada-normalized".to_string(),
        ..typed_fields()
    };
    api.push_update(Ok(server_fields.clone()));

    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_username("ada_typed");

    let outcome = engine.submit(&mut draft).await.unwrap();

    assert_eq!(outcome.summary(), EditSummary::Updated);
    assert_eq!(outcome.avatar, SubOutcome::NotAttempted);
    // Server-returned values win over the locally typed ones.
    assert_eq!(draft.fields(), &server_fields);
    assert!(!draft.is_text_modified());
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_resubmit_after_success_has_nothing_to_sync() {
    let api = Arc::new(MockApi::default());
    api.push_update(Ok(typed_fields()));

    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_description("New bio");

    engine.submit(&mut draft).await.unwrap();
    let err = engine.submit(&mut draft).await.unwrap_err();

    assert_eq!(err, RoomlyError::NothingToSync);
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_both_sides_success() {
    let api = Arc::new(MockApi::default());
    api.push_upload(Ok("https://cdn/avatars/new.png".to_string()));
    api.push_update(Ok(typed_fields()));

    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_email("ada@example.com");
    draft.pick_avatar(AvatarSource::new("/device/picked.png"));

    let outcome = engine.submit(&mut draft).await.unwrap();

    assert_eq!(outcome.summary(), EditSummary::Updated);
    assert_eq!(
        outcome.summary().message(),
        "Your profile has been updated"
    );
    assert_eq!(draft.photo_url(), Some("https://cdn/avatars/new.png"));
    assert!(!draft.is_text_modified());
    assert!(!draft.has_pending_avatar());
}

#[tokio::test]
async fn test_avatar_success_text_failure_is_partial() {
    let api = Arc::new(MockApi::default());
    api.push_upload(Ok("https://cdn/avatars/new.png".to_string()));
    api.push_update(Err(RoomlyError::server("update blew up")));

    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_username("ada_typed");
    draft.pick_avatar(AvatarSource::new("/device/picked.png"));

    let outcome = engine.submit(&mut draft).await.unwrap();

    // Combined outcome is failure with the text reason, not the avatar's.
    assert_eq!(
        outcome.summary(),
        EditSummary::Failed("An error occurred".to_string())
    );
    assert!(outcome.avatar.is_succeeded());
    assert!(outcome.text.is_failed());

    // The confirmed picture is kept, the avatar selection is consumed, and
    // the text side stays marked for a retry.
    assert_eq!(draft.photo_url(), Some("https://cdn/avatars/new.png"));
    assert!(!draft.has_pending_avatar());
    assert!(draft.is_text_modified());
}

#[tokio::test]
async fn test_avatar_failure_never_aborts_text_update() {
    let api = Arc::new(MockApi::default());
    api.push_upload(Err(RoomlyError::server("picture rejected")));
    api.push_update(Ok(typed_fields()));

    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let original_photo = sample_profile().photo_url;
    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_username("ada_typed");
    draft.pick_avatar(AvatarSource::new("/device/picked.png"));

    let outcome = engine.submit(&mut draft).await.unwrap();

    // Text was still attempted and succeeded.
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
    assert!(outcome.text.is_succeeded());

    // Avatar failure wins the merge; the displayed picture is unchanged and
    // the selection stays pending for a retry.
    assert_eq!(
        outcome.summary(),
        EditSummary::Failed("An error occurred".to_string())
    );
    assert_eq!(draft.photo_url(), original_photo.as_deref());
    assert!(draft.has_pending_avatar());
    assert!(!draft.is_text_modified());
}

#[tokio::test]
async fn test_both_failures_report_avatar_reason_first() {
    let api = Arc::new(MockApi::default());
    api.push_upload(Err(RoomlyError::conflict("picture too large")));
    api.push_update(Err(RoomlyError::server("update blew up")));

    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_username("ada_typed");
    draft.pick_avatar(AvatarSource::new("/device/picked.png"));

    let outcome = engine.submit(&mut draft).await.unwrap();

    assert_eq!(
        outcome.summary(),
        EditSummary::Failed("picture too large".to_string())
    );
    // Both sides stay marked for a retry.
    assert!(draft.has_pending_avatar());
    assert!(draft.is_text_modified());
}

#[tokio::test]
async fn test_rejected_credential_during_update_drops_session() {
    let api = Arc::new(MockApi::default());
    api.push_update(Err(RoomlyError::AuthInvalid));

    let (engine, controller) = signed_in_engine(api.clone()).await;
    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_username("ada_typed");

    let outcome = engine.submit(&mut draft).await.unwrap();

    assert!(outcome.text.is_failed());
    assert!(!controller.is_authenticated().await);
}

#[tokio::test]
async fn test_load_profile_returns_authoritative_profile() {
    let api = Arc::new(MockApi::default());
    api.push_profile(Ok(sample_profile()));

    let (engine, _controller) = signed_in_engine(api.clone()).await;
    let profile = engine.load_profile().await.unwrap();

    assert_eq!(profile, sample_profile());
}

#[tokio::test]
async fn test_load_profile_with_rejected_credential_drops_session() {
    let api = Arc::new(MockApi::default());
    api.push_profile(Err(RoomlyError::AuthInvalid));

    let (engine, controller) = signed_in_engine(api.clone()).await;
    let err = engine.load_profile().await.unwrap_err();

    assert_eq!(err, RoomlyError::AuthInvalid);
    assert!(!controller.is_authenticated().await);
}

#[tokio::test]
async fn test_setters_mark_text_modified() {
    let mut draft = ProfileDraft::from_profile(sample_profile());
    assert!(!draft.is_text_modified());

    draft.set_email("new@example.com");
    assert!(draft.is_text_modified());

    let request = draft.edit_request();
    assert_eq!(request.text_fields.unwrap().email, "new@example.com");
    assert!(request.avatar.is_none());
}

#[tokio::test]
async fn test_session_used_is_the_controllers_current_one() {
    // The engine resolves the credential at submit time; an invalidated
    // session must make the next submit fail before any call.
    let api = Arc::new(MockApi::default());
    let (engine, controller) = signed_in_engine(api.clone()).await;
    controller.log_out().await;

    let mut draft = ProfileDraft::from_profile(sample_profile());
    draft.set_username("ada_typed");

    let err = engine.submit(&mut draft).await.unwrap_err();
    assert_eq!(err, RoomlyError::AuthInvalid);
    assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
}
