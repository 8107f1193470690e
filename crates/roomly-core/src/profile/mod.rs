//! Profile domain: the user profile and the two-sided edit protocol.

pub mod edit;
pub mod model;

pub use edit::{EditSummary, ProfileEditOutcome, ProfileEditRequest, SubOutcome};
pub use model::{AvatarSource, Profile, ProfileFields};
