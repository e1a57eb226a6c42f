//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Email/password credential login
//! - Session token generation and validation (7-day HS256 tokens)
//! - TOTP second factor setup and verification
//! - Session cookie handling
//! - AuthedUser / PendingUser extractors for protected routes

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod totp;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
