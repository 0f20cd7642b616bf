use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::UserAccount;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the account
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: &str, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: username.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("{0}")]
    InvalidToken(String),

    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Longest token lifetime accepted; larger settings are clamped to it.
pub const MAX_EXPIRY_HOURS: u64 = 24 * 365;

/// Signing key and lifetime for issued tokens.
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    pub expiry_hours: u64,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, expiry_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiry_hours: expiry_hours.min(MAX_EXPIRY_HOURS),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.jwt_secret.clone(), security.jwt_expiry_hours)
    }

    pub fn generate(&self, username: &str) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let claims = Claims::new(username, self.expiry_hours);
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(format!("Invalid JWT token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// Salted SHA-256 digest of a password, hex encoded.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(account: &UserAccount, password: &str) -> bool {
    hash_password(password, &account.salt) == account.password_hash
}

/// Builds a new account document with a fresh salt.
pub fn new_account(username: &str, password: &str, readonly: bool) -> UserAccount {
    let salt = Uuid::new_v4().simple().to_string();
    UserAccount {
        username: username.to_string(),
        password_hash: hash_password(password, &salt),
        salt,
        readonly,
        created_at: Utc::now(),
    }
}
