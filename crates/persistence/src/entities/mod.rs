//! Entity definitions (database row mappings).

pub mod event;
pub mod match_profile;
pub mod match_suggestion;
pub mod registration;
pub mod user;

pub use event::EventEntity;
pub use match_profile::{CandidateEntity, MatchProfileEntity};
pub use match_suggestion::SuggestionWithCandidateEntity;
pub use registration::RegistrationEntity;
pub use user::UserEntity;
