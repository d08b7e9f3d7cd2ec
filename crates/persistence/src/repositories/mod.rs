//! Repository implementations.

pub mod event;
pub mod match_profile;
pub mod match_suggestion;
pub mod registration;
pub mod user;

pub use event::EventRepository;
pub use match_profile::MatchProfileRepository;
pub use match_suggestion::MatchSuggestionRepository;
pub use registration::RegistrationRepository;
pub use user::UserRepository;
