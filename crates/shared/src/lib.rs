//! Shared utilities for the Evenzi backend.
//!
//! This crate contains:
//! - JWT token generation and validation
//! - Common request validators
//! - Cursor-based pagination helpers

pub mod jwt;
pub mod pagination;
pub mod validation;
