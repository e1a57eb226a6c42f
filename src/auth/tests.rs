//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Session token encoding/decoding
//! - The require_2fa claim and its backwards-compatible default
//! - Token issuance helper

#[cfg(test)]
mod tests {
    use super::super::*;
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

    #[test]
    fn test_token_round_trip() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 9999999999, // Far future
            require_2fa: false,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode token");

        assert_eq!(decoded.claims.sub, "U_TEST01");
        assert!(!decoded.claims.require_2fa);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 9999999999,
            require_2fa: false,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key"),
        )
        .expect("Failed to encode token");

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(b"wrong_secret_key"),
            &Validation::new(Algorithm::HS256),
        );

        assert!(
            result.is_err(),
            "Token validation should fail with wrong secret"
        );
    }

    #[test]
    fn test_pending_flag_survives_round_trip() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 9999999999,
            require_2fa: true,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode token");

        assert!(decoded.claims.require_2fa);
    }

    #[test]
    fn test_require_2fa_defaults_to_false() {
        // Tokens minted before an account enrolled in 2FA have no
        // require_2fa claim; they must keep resolving as full sessions.
        let claims: models::Claims =
            serde_json::from_str(r#"{"sub":"U_TEST01","exp":9999999999}"#)
                .expect("Failed to deserialize claims without require_2fa");

        assert!(!claims.require_2fa);
    }

    #[test]
    fn test_issued_token_verifies_and_carries_flag() {
        let secret = "test_secret_key";

        let token = handlers::issue_token("U_TEST01", true, secret).expect("issue failed");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode issued token");

        assert_eq!(decoded.claims.sub, "U_TEST01");
        assert!(decoded.claims.require_2fa);
        // 7-day window
        let now = chrono::Utc::now().timestamp() as usize;
        assert!(decoded.claims.exp > now + 6 * 24 * 60 * 60);
        assert!(decoded.claims.exp <= now + 7 * 24 * 60 * 60 + 60);
    }
}
