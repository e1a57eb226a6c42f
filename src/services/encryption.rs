// src/services/encryption.rs
//! AES-256-GCM encryption for secrets at rest (TOTP secrets).

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("Encryption key not configured")]
    KeyNotConfigured,

    #[error("Invalid encryption key format")]
    InvalidKeyFormat,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid encrypted data format")]
    InvalidDataFormat,
}

pub struct EncryptionService {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for EncryptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionService")
            .field("cipher", &"<encrypted>")
            .finish()
    }
}

impl EncryptionService {
    /// Initialize encryption service from environment variable
    pub fn from_env() -> Result<Self, EncryptionError> {
        let key_str =
            env::var("ENCRYPTION_MASTER_KEY").map_err(|_| EncryptionError::KeyNotConfigured)?;

        Self::from_key(&key_str)
    }

    /// Initialize encryption service from a base64-encoded key string
    pub fn from_key(key_str: &str) -> Result<Self, EncryptionError> {
        let key_bytes = BASE64
            .decode(key_str.as_bytes())
            .map_err(|_| EncryptionError::InvalidKeyFormat)?;

        // AES-256 requires a 32-byte key
        if key_bytes.len() != 32 {
            return Err(EncryptionError::InvalidKeyFormat);
        }

        let key = aes_gcm::Key::<Aes256Gcm>::from_slice(&key_bytes);
        let cipher = Aes256Gcm::new(key);

        Ok(Self { cipher })
    }

    /// Generate a new random encryption key (base64-encoded)
    pub fn generate_key() -> String {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        BASE64.encode(key)
    }

    /// Encrypt a plaintext string and return base64-encoded ciphertext with nonce
    pub fn encrypt(&self, plaintext: &str) -> Result<String, EncryptionError> {
        // 12-byte nonce for GCM
        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

        // nonce || ciphertext, base64 envelope
        let mut combined = nonce_bytes.to_vec();
        combined.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(combined))
    }

    /// Decrypt a base64-encoded ciphertext (with nonce) and return plaintext
    pub fn decrypt(&self, encrypted: &str) -> Result<String, EncryptionError> {
        let combined = BASE64
            .decode(encrypted.as_bytes())
            .map_err(|_| EncryptionError::InvalidDataFormat)?;

        if combined.len() < 12 {
            return Err(EncryptionError::InvalidDataFormat);
        }

        let (nonce_bytes, ciphertext) = combined.split_at(12);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext_bytes = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| EncryptionError::DecryptionFailed(e.to_string()))?;

        String::from_utf8(plaintext_bytes).map_err(|_| EncryptionError::InvalidDataFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = EncryptionService::generate_key();
        let service = EncryptionService::from_key(&key).unwrap();

        let secret = "JBSWY3DPEHPK3PXP";
        let encrypted = service.encrypt(secret).unwrap();
        assert_ne!(encrypted, secret);

        let decrypted = service.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted, secret);
    }

    #[test]
    fn test_decrypt_rejects_garbage() {
        let key = EncryptionService::generate_key();
        let service = EncryptionService::from_key(&key).unwrap();

        assert!(service.decrypt("not base64 !!!").is_err());
        assert!(service.decrypt("c2hvcnQ=").is_err()); // shorter than a nonce
    }

    #[test]
    fn test_wrong_key_fails_to_decrypt() {
        let service_a = EncryptionService::from_key(&EncryptionService::generate_key()).unwrap();
        let service_b = EncryptionService::from_key(&EncryptionService::generate_key()).unwrap();

        let encrypted = service_a.encrypt("JBSWY3DPEHPK3PXP").unwrap();
        assert!(service_b.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_invalid_key_rejected() {
        assert!(EncryptionService::from_key("too-short").is_err());
    }
}
