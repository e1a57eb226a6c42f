//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::cookies;
use super::models::{Claims, User};
use crate::common::{safe_email_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Resolves the session token from the session cookie or the Authorization
/// header and loads the user from the database. Tokens still awaiting the
/// second factor (`require_2fa`) are rejected as unauthenticated: this is the
/// enforcement point preventing 2FA bypass, and every protected route goes
/// through it.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
}

/// Like [`AuthedUser`], but also accepts tokens still awaiting the second
/// factor. Only the 2FA verify endpoint takes this type; accepting a pending
/// session anywhere else requires an explicit type change, not a forgotten
/// flag check.
#[derive(Debug)]
pub struct PendingUser {
    pub id: String,
    pub email: String,
    /// True when the presented token still requires the second factor
    pub pending: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (user, claims) = resolve_user(parts, state).await?;

        if claims.require_2fa {
            warn!(
                user_id = %user.id,
                "Authentication rejected: token still requires second factor"
            );
            return Err(ApiError::Unauthorized("second factor required".into()));
        }

        Ok(AuthedUser {
            id: user.id,
            email: user.email,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PendingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (user, claims) = resolve_user(parts, state).await?;

        Ok(PendingUser {
            id: user.id,
            email: user.email,
            pending: claims.require_2fa,
        })
    }
}

/// Shared resolution: token from cookie or bearer header, signature check,
/// user lookup. Flag policy is left to the extractor types above.
async fn resolve_user<S>(parts: &mut Parts, state: &S) -> Result<(User, Claims), ApiError>
where
    S: Send + Sync,
{
    let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
        Extension::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

    let app_state = state_lock.read().await.clone();

    let token = cookies::session_token(&parts.headers)
        .or_else(|| cookies::bearer_token(&parts.headers));

    let token = match token {
        Some(t) => t,
        None => {
            warn!("Authentication failed: no session cookie or Authorization header");
            return Err(ApiError::Unauthorized("missing auth".into()));
        }
    };

    let decoded = match decode::<Claims>(
        &token,
        &DecodingKey::from_secret(app_state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    ) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "Session token validation failed");
            return Err(ApiError::Unauthorized("invalid token".into()));
        }
    };

    let claims = decoded.claims;

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&claims.sub)
        .fetch_optional(&app_state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %claims.sub,
                "Database error during user lookup in authentication"
            );
            ApiError::DatabaseError(e)
        })?;

    match user {
        Some(u) => {
            debug!(
                user_id = %u.id,
                email = %safe_email_log(&u.email),
                pending_2fa = claims.require_2fa,
                "Session token resolved"
            );
            Ok((u, claims))
        }
        None => {
            warn!(user_id = %claims.sub, "Authentication failed: user not found in database");
            Err(ApiError::Unauthorized("user not found".into()))
        }
    }
}
