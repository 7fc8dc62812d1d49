use std::time::Duration;

use moka::future::Cache;
use rand::Rng;

/// Uniform random 6-digit code; leading zeros are preserved.
pub fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Pending application OTPs, keyed by lower-cased applicant email.
///
/// Injected app state rather than a global map: entries are process-local,
/// expire after the configured TTL and are replaced whenever the applicant
/// applies again.
pub struct OtpStore {
    codes: Cache<String, String>,
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            codes: Cache::builder()
                .max_capacity(100_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Generates and stores a fresh code for the email, replacing any
    /// pending one.
    pub async fn issue(&self, email: &str) -> String {
        let code = generate_code();
        self.codes.insert(normalize(email), code.clone()).await;
        code
    }

    /// Exact-match consume. The pending entry is removed before the
    /// comparison so two racing verifies can succeed at most once; a
    /// mismatch puts the code back, leaving the challenge pending.
    pub async fn consume_if_match(&self, email: &str, submitted: &str) -> bool {
        let key = normalize(email);
        match self.codes.remove(&key).await {
            Some(expected) if expected == submitted => true,
            Some(expected) => {
                self.codes.insert(key, expected).await;
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> OtpStore {
        OtpStore::new(Duration::from_secs(600))
    }

    #[test]
    fn codes_are_six_digits_with_leading_zeros() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[actix_web::test]
    async fn correct_code_verifies_exactly_once() {
        let store = store();
        let code = store.issue("candidate@mail.com").await;
        assert!(store.consume_if_match("candidate@mail.com", &code).await);
        // consumed: the same code must not verify again
        assert!(!store.consume_if_match("candidate@mail.com", &code).await);
    }

    #[actix_web::test]
    async fn mismatch_keeps_the_challenge_pending() {
        let store = store();
        let code = store.issue("candidate@mail.com").await;
        let wrong = if code == "000000" { "000001" } else { "000000" };
        assert!(!store.consume_if_match("candidate@mail.com", wrong).await);
        assert!(store.consume_if_match("candidate@mail.com", &code).await);
    }

    #[actix_web::test]
    async fn unknown_email_never_verifies() {
        let store = store();
        assert!(!store.consume_if_match("nobody@mail.com", "123456").await);
    }

    #[actix_web::test]
    async fn reapply_replaces_the_pending_code() {
        let store = store();
        let first = store.issue("candidate@mail.com").await;
        let second = store.issue("candidate@mail.com").await;
        if first != second {
            assert!(!store.consume_if_match("candidate@mail.com", &first).await);
        }
        assert!(store.consume_if_match("candidate@mail.com", &second).await);
    }

    #[actix_web::test]
    async fn email_lookup_is_case_insensitive() {
        let store = store();
        let code = store.issue("Candidate@Mail.com").await;
        assert!(store.consume_if_match("candidate@mail.com", &code).await);
    }

    #[actix_web::test]
    async fn codes_expire_after_the_ttl() {
        let store = OtpStore::new(Duration::from_millis(50));
        let code = store.issue("candidate@mail.com").await;
        actix_web::rt::time::sleep(Duration::from_millis(120)).await;
        assert!(!store.consume_if_match("candidate@mail.com", &code).await);
    }
}
