//! Domain layer for the Evenzi backend.
//!
//! This crate contains:
//! - Domain models (Event, Registration, MatchProfile, User) and the
//!   matchmaking suggestion wire shapes
//! - Business logic services (matchmaking scorer, badge code generation)

pub mod models;
pub mod services;
