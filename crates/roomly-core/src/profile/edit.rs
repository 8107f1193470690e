//! Profile edit request and outcome types.
//!
//! A profile edit is two independent sub-operations (avatar upload, text
//! field update). This module carries the request describing which sides are
//! present and the merge rule that combines the two results into the single
//! message shown to the user.

use super::model::{AvatarSource, ProfileFields};

/// What the user wants synchronized.
///
/// Each side is present only if the user actually modified it since the last
/// sync. A request with neither side set is rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditRequest {
    /// Full replacement values for the text fields, when any was modified.
    pub text_fields: Option<ProfileFields>,
    /// Newly selected avatar image, when one was picked.
    pub avatar: Option<AvatarSource>,
}

impl ProfileEditRequest {
    /// True when there is nothing to synchronize.
    pub fn is_empty(&self) -> bool {
        self.text_fields.is_none() && self.avatar.is_none()
    }
}

/// The result of one sub-operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubOutcome<T> {
    /// The sub-operation's input was absent; it was never issued.
    NotAttempted,
    Succeeded(T),
    Failed(String),
}

impl<T> SubOutcome<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure reason, if this sub-operation was attempted and failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Combined result of a submitted profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditOutcome {
    /// Avatar upload result; success carries the new picture URL.
    pub avatar: SubOutcome<String>,
    /// Text update result; success carries the server-returned field values.
    pub text: SubOutcome<ProfileFields>,
}

impl Default for ProfileEditOutcome {
    fn default() -> Self {
        Self {
            avatar: SubOutcome::NotAttempted,
            text: SubOutcome::NotAttempted,
        }
    }
}

impl ProfileEditOutcome {
    /// Merges the two sub-operation results into one reported outcome.
    ///
    /// Any attempted failure makes the combined outcome a failure, reporting
    /// the reason of the first failing sub-operation in issue order (avatar
    /// before text). Sub-operations that were never attempted do not affect
    /// the merge.
    pub fn summary(&self) -> EditSummary {
        let first_failure = self
            .avatar
            .failure_reason()
            .or_else(|| self.text.failure_reason());

        match first_failure {
            Some(reason) => EditSummary::Failed(reason.to_string()),
            None => EditSummary::Updated,
        }
    }
}

/// The single user-visible result of a profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSummary {
    /// Every attempted sub-operation succeeded.
    Updated,
    /// At least one attempted sub-operation failed, with its reason.
    Failed(String),
}

impl EditSummary {
    /// The confirmation or error message to display.
    pub fn message(&self) -> &str {
        match self {
            Self::Updated => "Your profile has been updated",
            Self::Failed(reason) => reason,
        }
    }
}
