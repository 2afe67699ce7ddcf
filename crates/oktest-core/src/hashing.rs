//! Keyed one-way hashing of case answers.
//!
//! Locked answers are `hex(HMAC-SHA256(key, answer.trim()))`. Whitespace
//! around a guess does not matter; everything else does.
//!
//! The key is per assignment, not per case: two cases with the same answer
//! lock to the same hash. Unlock identities (`assignment\ntest\ncase_id`)
//! namespace attempt tracking, not hashes.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    key: String,
}

impl AnswerKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn hash(&self, text: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(text.trim().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    pub fn verify(&self, guess: &str, locked: &str) -> bool {
        self.hash(guess) == locked
    }

    /// Hash function suitable for [`crate::grading::GradedTest::lock`].
    pub fn hash_fn(&self) -> impl Fn(&str) -> String + '_ {
        move |text| self.hash(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_hex_sha256_sized() {
        let key = AnswerKey::new("secret");
        let h = key.hash("42");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verify_ignores_surrounding_whitespace() {
        let key = AnswerKey::new("secret");
        let locked = key.hash("Frank");
        assert!(key.verify("  Frank\n", &locked));
        assert!(!key.verify("frank", &locked));
    }

    #[test]
    fn different_keys_do_not_verify() {
        let locked = AnswerKey::new("a").hash("x");
        assert!(!AnswerKey::new("b").verify("x", &locked));
    }

    #[test]
    fn equal_answers_share_a_hash_under_one_key() {
        let key = AnswerKey::new("lab00");
        let hash = key.hash_fn();
        assert_eq!(hash("yes"), hash("yes"));
    }
}
