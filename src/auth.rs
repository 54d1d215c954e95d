//! Credential handling: argon2 password hashing and JWT issuance for the
//! login endpoint. Deliberately small — the application model is a role
//! string per user, not a permission matrix.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{user, UserRole};
use crate::errors::ServiceError;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::HashError(err.to_string()))
}

/// Verify a plaintext password against a stored argon2 hash. A malformed
/// stored hash is an internal error, not a failed login.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, ServiceError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|err| ServiceError::HashError(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// JWT claims carried by a login token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub role: UserRole,
    /// Token id
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a signed token for a verified user.
pub fn issue_token(
    user: &user::Model,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, ServiceError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        jti: Uuid::new_v4().to_string(),
        iat: now,
        exp: now + expiration_secs as i64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| ServiceError::InternalError(format!("token encoding failed: {}", err)))
}

/// Decode and validate a token, returning its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ServiceError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| ServiceError::Unauthorized(format!("invalid token: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> user::Model {
        user::Model {
            id: 5,
            username: "bassam".to_string(),
            password_hash: String::new(),
            role: UserRole::Seller,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let a = hash_password("secret-password").unwrap();
        let b = hash_password("secret-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_internal_error() {
        assert!(verify_password("anything", "plaintext-legacy-value").is_err());
    }

    #[test]
    fn issued_token_decodes_with_same_secret() {
        let token = issue_token(&test_user(), "0123456789abcdef0123456789abcdef", 3600).unwrap();
        let claims = decode_token(&token, "0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(claims.sub, "5");
        assert_eq!(claims.username, "bassam");
        assert_eq!(claims.role, UserRole::Seller);
    }

    #[test]
    fn token_rejected_with_wrong_secret() {
        let token = issue_token(&test_user(), "0123456789abcdef0123456789abcdef", 3600).unwrap();
        assert!(decode_token(&token, "another-secret-entirely-32-chars!").is_err());
    }
}
