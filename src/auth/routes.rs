//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/register` - Create an account
/// - `POST /api/auth/login` - Credential login (sets cookie or pending header)
/// - `POST /api/auth/logout` - Clear the session cookie
/// - `POST /api/auth/2fa/setup` - Issue a fresh TOTP secret
/// - `POST /api/auth/2fa/verify` - Confirm a TOTP code (setup or login path)
/// - `GET /api/me` - Get current user information
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/2fa/setup", post(handlers::two_factor_setup))
        .route("/api/auth/2fa/verify", post(handlers::two_factor_verify))
        .route("/api/me", get(handlers::me))
}
