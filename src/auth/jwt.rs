use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::models::Claims;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_access_token(
    employee_id: u64,
    email: String,
    role: String,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        employee_id,
        sub: email,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_through_verification() {
        let token = generate_access_token(
            1001,
            "john.doe@company.com".to_string(),
            "employee".to_string(),
            "test-secret",
            3600,
        );
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.employee_id, 1001);
        assert_eq!(claims.sub, "john.doe@company.com");
        assert_eq!(claims.role, "employee");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token =
            generate_access_token(1, "a@b.c".to_string(), "hr".to_string(), "secret-a", 3600);
        assert!(verify_token(&token, "secret-b").is_err());
    }
}
