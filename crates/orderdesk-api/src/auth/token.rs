//! JWT issuing and validation (HS256).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use orderdesk_core::{models::User, AppError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token claims. `superuser` is carried in the token so the middleware can
/// build the request context without a database round-trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub superuser: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token for an authenticated user.
pub fn issue_token(user: &User, secret: &str, expiry_hours: i64) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        superuser: user.is_superuser,
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Validate a bearer token and return its claims. Expiry is enforced by the
/// default validation.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn test_user(is_superuser: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "dalibor".to_string(),
            password_hash: "unused".to_string(),
            is_superuser,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let user = test_user(true);
        let token = issue_token(&user, SECRET, 24).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "dalibor");
        assert!(claims.superuser);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&test_user(false), SECRET, 24).unwrap();
        let result = verify_token(&token, "another-secret-another-secret-xx");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let mut token = issue_token(&test_user(false), SECRET, 24).unwrap();
        token.push('x');
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_superuser_flag_survives_round_trip() {
        let token = issue_token(&test_user(false), SECRET, 24).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert!(!claims.superuser);
    }
}
