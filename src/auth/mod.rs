use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::SecurityConfig;

pub const MANAGER_ROLE: &str = "manager";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn manager(issued_at: DateTime<Utc>, ttl: Duration) -> Result<Self, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::TokenGeneration(format!("token lifetime {ttl} overflows")))?;

        Ok(Self {
            role: MANAGER_ROLE.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Token lifetime out of range: {0:?}")]
    InvalidLifetime(std::time::Duration),
}

/// Exchanges the shared manager password for a signed, time-limited token and
/// verifies those tokens on mutating requests. Holds no session state.
pub struct CredentialGate {
    password_digest: [u8; 32],
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl CredentialGate {
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        let ttl = Duration::from_std(security.jwt_expiry)
            .map_err(|_| AuthError::InvalidLifetime(security.jwt_expiry))?;

        Ok(Self {
            password_digest: digest(&security.manager_password),
            encoding_key: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            ttl,
        })
    }

    /// Issue a manager token if `password` matches the configured secret.
    pub fn login(&self, password: &str) -> Result<String, AuthError> {
        // Compare fixed-size digests so the comparison does not depend on input length
        if digest(password) != self.password_digest {
            return Err(AuthError::InvalidPassword);
        }
        self.sign(&Claims::manager(Utc::now(), self.ttl)?)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Check signature, expiry and role.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.role != MANAGER_ROLE {
            return Err(AuthError::InvalidToken(format!("unexpected role '{}'", claims.role)));
        }
        Ok(claims)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
