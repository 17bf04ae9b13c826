use std::time::{SystemTime, UNIX_EPOCH};

use crate::{error::ApiError, models::Claims};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs() as usize
}

/// Signed bearer token embedding the admin identity and an expiry `ttl`
/// seconds from now.
pub fn issue_token(
    admin_id: u64,
    email: String,
    secret: &str,
    ttl: usize,
) -> Result<String, ApiError> {
    let claims = Claims {
        admin_id,
        sub: email,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| ApiError::Unknown)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => ApiError::TokenExpired,
        _ => ApiError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_verifies_and_carries_subject() {
        let token = issue_token(7, "admin@admin.com".into(), SECRET, 3600).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.admin_id, 7);
        assert_eq!(claims.sub, "admin@admin.com");
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = issue_token(7, "admin@admin.com".into(), SECRET, 3600).unwrap();
        assert!(matches!(
            verify_token(&token, "other-secret"),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let mut token = issue_token(7, "admin@admin.com".into(), SECRET, 3600).unwrap();
        token.push('x');
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            verify_token("not.a.jwt", SECRET),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        // Expiry well past the default 60s validation leeway.
        let claims = Claims {
            admin_id: 7,
            sub: "admin@admin.com".into(),
            exp: now() - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, SECRET),
            Err(ApiError::TokenExpired)
        ));
    }
}
