use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// HR user id
    pub sub: u64,
    pub email: String,
    pub exp: usize,
    pub jti: String,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_token(
    user_id: u64,
    email: &str,
    secret: &str,
    ttl: usize,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to sign token");
        AppError::internal()
    })
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

    const SECRET: &str = "test-secret-at-least-ten-chars";

    #[test]
    fn token_round_trips() {
        let token = generate_token(42, "hr@x.com", SECRET, 3600).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "hr@x.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(42, "hr@x.com", SECRET, 3600).unwrap();
        assert!(verify_token(&token, "another-secret-entirely").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // exp well past the default 60s leeway
        let claims = Claims {
            sub: 42,
            email: "hr@x.com".to_string(),
            exp: now() - 120,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }
}
