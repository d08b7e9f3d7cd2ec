//! Business logic services.

pub mod matchmaking;
