//! Shared-password authentication and session tokens.
//!
//! The backend has no user accounts: anyone holding one of the configured
//! passwords (admin or volunteer) can log in and receives an HS256 JWT.
//! Plaintext passwords are hashed with Argon2 at startup and dropped.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use std::sync::Arc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Session lifetime: 8 hours
pub const TOKEN_TTL_SECS: i64 = 8 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("incorrect password")]
    InvalidPassword,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("password check did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct AuthService {
    jwt_secret: Vec<u8>,
    password_hashes: Vec<String>,
}

impl AuthService {
    pub fn new(jwt_secret: &str, passwords: &[&str]) -> Result<Self, AuthError> {
        let argon2 = Argon2::default();
        let password_hashes = passwords
            .iter()
            .map(|password| {
                let salt = SaltString::generate(&mut rand::thread_rng());
                argon2
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| AuthError::Hash(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            jwt_secret: jwt_secret.as_bytes().to_vec(),
            password_hashes,
        })
    }

    /// True when `candidate` matches any configured password. Runs Argon2
    /// inline; async callers go through `check_password`.
    pub fn verify_password(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let argon2 = Argon2::default();
        self.password_hashes.iter().any(|stored| {
            PasswordHash::new(stored)
                .map(|parsed| argon2.verify_password(candidate.as_bytes(), &parsed).is_ok())
                .unwrap_or(false)
        })
    }

    /// `verify_password` on the blocking pool
    pub async fn check_password(self: &Arc<Self>, candidate: &str) -> Result<bool, AuthError> {
        let auth = Arc::clone(self);
        let candidate = candidate.to_owned();
        let matched =
            tokio::task::spawn_blocking(move || auth.verify_password(&candidate)).await?;
        Ok(matched)
    }

    pub async fn authenticate(self: &Arc<Self>, password: &str) -> Result<(), AuthError> {
        if self.check_password(password).await? {
            Ok(())
        } else {
            Err(AuthError::InvalidPassword)
        }
    }

    /// Issue a session token. Returns the token and its expiry (Unix seconds).
    pub fn issue_token(&self) -> Result<(String, i64), AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )?;
        Ok((token, claims.exp))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        )?;
        Ok(data.claims)
    }

    /// Accepts either a live session token or a shared password
    pub async fn accepts(self: &Arc<Self>, secret: &str) -> bool {
        match self.verify_token(secret) {
            Ok(_) => return true,
            Err(e) => debug!(error = %e, "Secret is not a valid token, checking passwords"),
        }
        match self.check_password(secret).await {
            Ok(matched) => matched,
            Err(e) => {
                error!(error = %e, "Password check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Arc<AuthService> {
        Arc::new(AuthService::new("test-secret", &["admin-pass", "volunteer-pass"]).unwrap())
    }

    #[test]
    fn test_both_shared_passwords_are_accepted() {
        let auth = service();
        assert!(auth.verify_password("admin-pass"));
        assert!(auth.verify_password("volunteer-pass"));
        assert!(!auth.verify_password("wrong"));
        assert!(!auth.verify_password(""));
    }

    #[tokio::test]
    async fn test_authenticate_checks_passwords_off_the_runtime() {
        let auth = service();
        assert!(auth.authenticate("admin-pass").await.is_ok());
        assert!(matches!(
            auth.authenticate("wrong").await,
            Err(AuthError::InvalidPassword)
        ));
        assert!(auth.accepts("volunteer-pass").await);
        assert!(!auth.accepts("").await);
    }

    #[tokio::test]
    async fn test_issued_token_verifies_and_expires_in_eight_hours() {
        let auth = service();
        let (token, expires_at) = auth.issue_token().unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.exp, expires_at);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
        assert!(auth.accepts(&token).await);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let other = AuthService::new("other-secret", &["admin-pass"]).unwrap();
        let (token, _) = other.issue_token().unwrap();
        assert!(service().verify_token(&token).is_err());
        assert!(!service().accepts(&token).await);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = service();
        let now = Utc::now().timestamp();
        let stale = encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                iat: now - TOKEN_TTL_SECS - 60,
                exp: now - 60,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(auth.verify_token(&stale).is_err());
    }
}
