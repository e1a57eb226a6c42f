// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., S_K7NP3X for subscriptions)
//!
//! Benefits:
//! - No ambiguous characters (excludes I, L, O, U)
//! - Case-insensitive
//! - ~1 billion combinations per entity type (32^6)
//! - Easy to read, type, and communicate verbally

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of the random portion of an ID
const ID_LENGTH: usize = 6;

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User account (U_)
    User,
    /// Subscription (SB_)
    Subscription,
    /// Loan (LN_)
    Loan,
    /// Budget (BD_)
    Budget,
    /// Goal (GL_)
    Goal,
}

impl EntityPrefix {
    /// Get the string prefix for this entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Subscription => "SB",
            EntityPrefix::Loan => "LN",
            EntityPrefix::Budget => "BD",
            EntityPrefix::Goal => "GL",
        }
    }
}

/// Generate a random Crockford Base32 string of the given length
fn random_base32(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CROCKFORD_ALPHABET.len());
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID for the given entity type
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), random_base32(ID_LENGTH))
}

pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

pub fn generate_subscription_id() -> String {
    generate_id(EntityPrefix::Subscription)
}

pub fn generate_loan_id() -> String {
    generate_id(EntityPrefix::Loan)
}

pub fn generate_budget_id() -> String {
    generate_id(EntityPrefix::Budget)
}

pub fn generate_goal_id() -> String {
    generate_id(EntityPrefix::Goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_has_prefix() {
        let id = generate_user_id();
        assert!(id.starts_with("U_"));
        assert_eq!(id.len(), "U_".len() + ID_LENGTH);
    }

    #[test]
    fn test_generated_id_uses_crockford_alphabet() {
        let id = generate_subscription_id();
        let random_part = id.strip_prefix("SB_").unwrap();
        assert!(random_part
            .bytes()
            .all(|b| CROCKFORD_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_ids_are_unique_enough() {
        let a = generate_loan_id();
        let b = generate_loan_id();
        // 32^6 combinations; a collision here means the RNG is broken
        assert_ne!(a, b);
    }

    #[test]
    fn test_each_prefix_is_distinct() {
        let prefixes = [
            EntityPrefix::User,
            EntityPrefix::Subscription,
            EntityPrefix::Loan,
            EntityPrefix::Budget,
            EntityPrefix::Goal,
        ];
        let strings: Vec<&str> = prefixes.iter().map(|p| p.as_str()).collect();
        let mut deduped = strings.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(strings.len(), deduped.len());
    }
}
