//! Domain models for the Evenzi backend.

pub mod event;
pub mod match_profile;
pub mod match_suggestion;
pub mod registration;
pub mod user;

pub use event::{CreateEventRequest, Event};
pub use match_profile::{MatchProfile, UpsertMatchProfileRequest};
pub use match_suggestion::{
    GenerateSuggestionsRequest, SuggestedProfile, SuggestedUser, SuggestionItem,
    SuggestionsResponse,
};
pub use registration::{
    generate_short_code, CheckInIdentifier, CheckInRequest, CheckInResponse,
    CreateRegistrationRequest, Registration,
};
pub use user::{User, UserRole};
