//! TOTP (Time-based One-Time Password) second factor
//!
//! Implements RFC 6238 code generation and validation.

use thiserror::Error;
use totp_rs::{Algorithm, Secret, TOTP};

use super::models::TwoFactorSetupResponse;

/// Number of digits in a code
const TOTP_DIGITS: usize = 6;
/// Time step in seconds
const TOTP_STEP: u64 = 30;
/// Accepted clock drift, in time steps, on either side of now
const TOTP_SKEW: u8 = 1;

#[derive(Debug, Error)]
pub enum TotpError {
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),

    #[error("Failed to create TOTP: {0}")]
    Construction(String),

    #[error("Failed to generate QR code: {0}")]
    QrGeneration(String),
}

/// Generates secrets and validates codes for the second factor
pub struct TotpService {
    issuer: String,
}

impl TotpService {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
        }
    }

    fn build(&self, secret_base32: &str, account: &str) -> Result<TOTP, TotpError> {
        let secret = Secret::Encoded(secret_base32.to_string());

        TOTP::new(
            Algorithm::SHA1,
            TOTP_DIGITS,
            TOTP_SKEW,
            TOTP_STEP,
            secret
                .to_bytes()
                .map_err(|e| TotpError::InvalidSecret(format!("{:?}", e)))?,
            Some(self.issuer.clone()),
            account.to_string(),
        )
        .map_err(|e| TotpError::Construction(e.to_string()))
    }

    /// Generate a new base32 secret
    pub fn generate_secret(&self) -> String {
        Secret::generate_secret().to_encoded().to_string()
    }

    /// Create setup data for a user: fresh secret, provisioning URI, QR code
    pub fn setup(&self, email: &str) -> Result<TwoFactorSetupResponse, TotpError> {
        let secret_str = self.generate_secret();
        let totp = self.build(&secret_str, email)?;

        let otpauth_url = totp.get_url();
        let qr_code = totp.get_qr_base64().map_err(TotpError::QrGeneration)?;

        Ok(TwoFactorSetupResponse {
            secret: secret_str,
            otpauth_url,
            qr_code: format!("data:image/png;base64,{}", qr_code),
        })
    }

    /// Validate a candidate code against a secret
    pub fn validate(&self, secret_base32: &str, code: &str) -> Result<bool, TotpError> {
        let totp = self.build(secret_base32, "")?;
        Ok(totp.check_current(code).unwrap_or(false))
    }

    /// Generate the code for the current time step (for testing)
    #[cfg(test)]
    pub fn generate_current(&self, secret_base32: &str) -> Result<String, TotpError> {
        let totp = self.build(secret_base32, "")?;
        totp.generate_current()
            .map_err(|e| TotpError::Construction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TotpService {
        TotpService::new("Financeito")
    }

    #[test]
    fn test_generate_secret_is_base32() {
        let secret = service().generate_secret();

        assert!(!secret.is_empty());
        assert!(secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '='));
    }

    #[test]
    fn test_setup_contains_provisioning_uri() {
        let setup = service().setup("ana@example.com").unwrap();

        assert!(!setup.secret.is_empty());
        assert!(setup.otpauth_url.contains("otpauth://"));
        assert!(setup.otpauth_url.contains("Financeito"));
        assert!(setup.qr_code.starts_with("data:image/png;base64,"));
        // Email may be URL-encoded (@ as %40)
        assert!(
            setup.otpauth_url.contains("ana@example.com")
                || setup.otpauth_url.contains("ana%40example.com")
        );
    }

    #[test]
    fn test_validate_correct_code() {
        let service = service();
        let secret = service.generate_secret();

        let code = service.generate_current(&secret).unwrap();
        assert!(service.validate(&secret, &code).unwrap());
    }

    #[test]
    fn test_same_code_verifies_against_persisted_secret() {
        // Setup path validates against the submitted secret; the login path
        // validates the persisted copy. Within one time step both accept the
        // same code.
        let service = service();
        let secret = service.generate_secret();
        let code = service.generate_current(&secret).unwrap();

        assert!(service.validate(&secret, &code).unwrap());
        let persisted = secret.clone();
        assert!(service.validate(&persisted, &code).unwrap());
    }

    #[test]
    fn test_validate_incorrect_code() {
        let service = service();
        let secret = service.generate_secret();

        assert!(!service.validate(&secret, "000000").unwrap());
        assert!(!service.validate(&secret, "12345").unwrap());
        assert!(!service.validate(&secret, "1234567").unwrap());
    }
}
