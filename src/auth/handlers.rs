//! Authentication handlers

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::extract::{Extension, Json};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::cookies::{self, PENDING_TOKEN_HEADER};
use super::extractors::{AuthedUser, PendingUser};
use super::models::{Claims, LoginRequest, RegisterRequest, TwoFactorVerifyRequest, User};
use super::totp::TotpService;
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};

/// POST /api/auth/register
/// Creates an account from email and password
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::ValidationError(
            "email: a valid email address is required".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::ValidationError(
            "password: must be at least 8 characters".to_string(),
        ));
    }

    let existing: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if existing.is_some() {
        return Err(ApiError::ValidationError(
            "email: already registered".to_string(),
        ));
    }

    let id = generate_user_id();
    let password_hash = hash_password(&payload.password)?;

    sqlx::query("INSERT INTO users (id, email, name, password_hash) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&email)
        .bind(payload.name.as_deref())
        .bind(&password_hash)
        .execute(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                email = %safe_email_log(&email),
                "Database error inserting new user"
            );
            ApiError::DatabaseError(e)
        })?;

    info!(
        user_id = %id,
        email = %safe_email_log(&email),
        "User account created"
    );

    let resp = serde_json::json!({
        "ok": true,
        "user": {
            "id": id,
            "email": email,
            "name": payload.name,
        },
    });

    Ok((StatusCode::CREATED, Json(resp)).into_response())
}

/// POST /api/auth/login
/// Verifies the credential and issues a session token.
///
/// With 2FA disabled the token lands in the session cookie. With 2FA enabled
/// it is returned in the `x-pending-token` header instead; no cookie is set
/// until the second factor completes.
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();

    let email = payload.email.trim().to_lowercase();

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // Same message for unknown email and wrong password
    let user = match user {
        Some(u) => u,
        None => {
            warn!(
                email = %safe_email_log(&email),
                "Login failed: unknown email"
            );
            return Err(ApiError::Unauthorized("invalid email or password".into()));
        }
    };

    if !verify_password(&user.password_hash, &payload.password) {
        warn!(
            user_id = %user.id,
            email = %safe_email_log(&user.email),
            "Login failed: wrong password"
        );
        return Err(ApiError::Unauthorized("invalid email or password".into()));
    }

    if user.totp_enabled {
        let token = issue_token(&user.id, true, &state.jwt_secret)?;

        info!(
            user_id = %user.id,
            email = %safe_email_log(&user.email),
            "Credential accepted, second factor pending"
        );

        let resp = serde_json::json!({ "ok": true, "require2FA": true });
        return Ok(([(PENDING_TOKEN_HEADER, token)], Json(resp)).into_response());
    }

    let token = issue_token(&user.id, false, &state.jwt_secret)?;
    let cookie = cookies::session_cookie(&token, state.cookie_secure);

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User logged in"
    );

    let resp = serde_json::json!({ "ok": true, "require2FA": false });
    Ok(([(header::SET_COOKIE, cookie)], Json(resp)).into_response())
}

/// POST /api/auth/logout
/// Clears the session cookie; tokens themselves expire on their own
pub async fn logout(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();
    let cookie = cookies::clear_session_cookie(state.cookie_secure);

    info!("User logout");

    let resp = serde_json::json!({ "ok": true });
    Ok(([(header::SET_COOKIE, cookie)], Json(resp)).into_response())
}

/// GET /api/me
/// Returns the current authenticated user's information
pub async fn me(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let resp = serde_json::json!({
        "ok": true,
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "two_factor_enabled": user.totp_enabled,
            "created_at": user.created_at,
        },
    });

    Ok(Json(resp))
}

/// POST /api/auth/2fa/setup
/// Generates a fresh TOTP secret and provisioning URI for the authenticated
/// user. Nothing is persisted until the code is verified.
pub async fn two_factor_setup(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let setup = TotpService::new(state.totp_issuer.clone())
        .setup(&authed.email)
        .map_err(|e| {
            error!(error = %e, user_id = %authed.id, "TOTP setup failed");
            ApiError::InternalServer("failed to generate second factor".to_string())
        })?;

    info!(user_id = %authed.id, "TOTP setup secret issued");

    Ok(Json(serde_json::json!({
        "ok": true,
        "secret": setup.secret,
        "otpauth_url": setup.otpauth_url,
        "qr_code": setup.qr_code,
    })))
}

/// POST /api/auth/2fa/verify
/// Two paths share this endpoint:
/// - `secret` present: setup confirmation. The code is checked against the
///   supplied secret; on success it becomes the account's enabled second
///   factor.
/// - `secret` absent: login confirmation. The code is checked against the
///   persisted secret; on success a full session cookie is issued.
///
/// A wrong code yields the same generic error in both paths.
pub async fn two_factor_verify(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    user: PendingUser,
    Json(payload): Json<TwoFactorVerifyRequest>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();

    let code = match payload.token.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => {
            return Err(ApiError::ValidationError(
                "token: code is required".to_string(),
            ));
        }
    };

    let totp = TotpService::new(state.totp_issuer.clone());

    match payload.secret {
        // Setup confirmation: commit the submitted secret once the code checks out
        Some(secret) => {
            if user.pending {
                warn!(
                    user_id = %user.id,
                    "2FA enrollment rejected for a session still awaiting its second factor"
                );
                return Err(ApiError::Unauthorized("second factor required".into()));
            }

            let valid = totp.validate(&secret, &code).map_err(|e| {
                warn!(error = %e, user_id = %user.id, "2FA setup verification failed");
                ApiError::InvalidCode
            })?;

            if !valid {
                warn!(user_id = %user.id, "2FA setup verification failed");
                return Err(ApiError::InvalidCode);
            }

            let stored = protect_secret(&state, &secret)?;
            store_totp_secret(&state.db, &user.id, &stored).await?;

            info!(user_id = %user.id, "Two-factor authentication enabled");

            let resp = serde_json::json!({ "ok": true, "enabled": true });
            Ok(Json(resp).into_response())
        }

        // Login confirmation: check against the persisted secret
        None => {
            let row: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(&user.id)
                .fetch_optional(&state.db)
                .await
                .map_err(ApiError::DatabaseError)?;

            let row = row.ok_or_else(|| ApiError::Unauthorized("user not found".into()))?;

            let stored = match (row.totp_enabled, row.totp_secret) {
                (true, Some(s)) => s,
                _ => {
                    return Err(ApiError::BadRequest(
                        "two-factor authentication is not enabled".to_string(),
                    ));
                }
            };

            let secret = reveal_secret(&state, &stored)?;

            let valid = totp.validate(&secret, &code).map_err(|e| {
                warn!(error = %e, user_id = %user.id, "2FA login verification failed");
                ApiError::InvalidCode
            })?;

            if !valid {
                warn!(user_id = %user.id, "2FA login verification failed");
                return Err(ApiError::InvalidCode);
            }

            let token = issue_token(&user.id, false, &state.jwt_secret)?;
            let cookie = cookies::session_cookie(&token, state.cookie_secure);

            info!(user_id = %user.id, "Second factor completed, session established");

            let resp = serde_json::json!({ "ok": true, "require2FA": false });
            Ok(([(header::SET_COOKIE, cookie)], Json(resp)).into_response())
        }
    }
}

// ---- Helper Functions ----

/// Issue a signed 7-day session token
pub fn issue_token(
    user_id: &str,
    require_2fa: bool,
    jwt_secret: &str,
) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::days(7)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        require_2fa,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "JWT encoding error");
        ApiError::InternalServer("jwt error".to_string())
    })
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ApiError::InternalServer("password hashing failed".to_string())
        })
}

fn verify_password(hash: &str, password: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Encrypt the TOTP secret for storage when a master key is configured
fn protect_secret(state: &AppState, secret: &str) -> Result<String, ApiError> {
    match &state.encryption {
        Some(enc) => enc.encrypt(secret).map_err(|e| {
            error!(error = %e, "Failed to encrypt TOTP secret");
            ApiError::InternalServer("failed to store second factor".to_string())
        }),
        None => Ok(secret.to_string()),
    }
}

/// Inverse of [`protect_secret`]
fn reveal_secret(state: &AppState, stored: &str) -> Result<String, ApiError> {
    match &state.encryption {
        Some(enc) => enc.decrypt(stored).map_err(|e| {
            error!(error = %e, "Failed to decrypt TOTP secret");
            ApiError::InternalServer("failed to read second factor".to_string())
        }),
        None => Ok(stored.to_string()),
    }
}

async fn store_totp_secret(
    pool: &SqlitePool,
    user_id: &str,
    stored: &str,
) -> Result<(), ApiError> {
    sqlx::query("UPDATE users SET totp_secret = ?, totp_enabled = 1 WHERE id = ?")
        .bind(stored)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "Database error storing TOTP secret");
            ApiError::DatabaseError(e)
        })?;

    Ok(())
}
