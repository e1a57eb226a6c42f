//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Session token claims
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    /// True while the second factor is still pending. Defaults to false so
    /// tokens minted before an account enrolled in 2FA keep verifying.
    #[serde(default)]
    pub require_2fa: bool,
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Base32 TOTP secret, encrypted at rest when a master key is configured
    #[serde(skip_serializing)]
    pub totp_secret: Option<String>,
    pub totp_enabled: bool,
    pub created_at: Option<String>,
}

/// Registration payload
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Login payload
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 2FA verification payload.
///
/// `token` is the candidate TOTP code. When `secret` is present this is the
/// setup-confirmation path; when absent, the login-confirmation path.
#[derive(Deserialize)]
pub struct TwoFactorVerifyRequest {
    pub token: Option<String>,
    pub secret: Option<String>,
}

/// Returned by 2FA setup; nothing is persisted until the code is verified
#[derive(Debug, Serialize)]
pub struct TwoFactorSetupResponse {
    /// The secret in base32 format (for manual entry)
    pub secret: String,
    /// The provisioning URI for authenticator apps
    pub otpauth_url: String,
    /// QR code as data URI (base64 PNG)
    pub qr_code: String,
}
