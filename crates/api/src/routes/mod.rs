//! HTTP route handlers.

pub mod check_in;
pub mod events;
pub mod health;
pub mod match_profiles;
pub mod matchmaking;
pub mod registrations;
pub mod users;
