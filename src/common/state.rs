// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::EncryptionService;

/// Application state containing database pool and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    /// Whether session cookies carry the Secure attribute (true in production)
    pub cookie_secure: bool,
    /// Issuer shown in authenticator apps for provisioned TOTP secrets
    pub totp_issuer: String,
    /// Encrypts TOTP secrets at rest when ENCRYPTION_MASTER_KEY is configured
    pub encryption: Option<Arc<EncryptionService>>,
}
