use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Identity claims embedded in every session token.
///
/// Tokens are self-contained: verification needs only the signing secret and
/// the clock, no server-side session store. The trade-off is that a token
/// cannot be revoked before its natural expiry - logout is a client-side
/// token discard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id in its external string form
    pub sub: String,
    pub username: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: String, username: String, email: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            username,
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    Generation(String),
    #[error("JWT secret not configured")]
    MissingSecret,
    /// Malformed, signed with the wrong secret, or expired. Callers must not
    /// distinguish these cases to the client.
    #[error("invalid or expired token")]
    Invalid,
}

/// Sign a token carrying the given claims with the configured secret.
pub fn issue_token(claims: &Claims) -> Result<String, TokenError> {
    issue_token_with_secret(claims, &config::config().security.jwt_secret)
}

pub fn issue_token_with_secret(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Check signature and expiry; any failure collapses to `TokenError::Invalid`.
pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    verify_token_with_secret(token, &config::config().security.jwt_secret)
}

pub fn verify_token_with_secret(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut validation = Validation::default();
    // Expiry is exact: a token stops verifying at the boundary, not a
    // leeway-window later
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)
}

/// Strategy for checking a login password against the stored credential.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, candidate: &str, stored: &str) -> bool;
}

/// Byte-for-byte comparison against the plaintext credential the store keeps.
///
/// WARNING: insecure default. The production data stores passwords unhashed
/// and this verifier preserves that behavior. Swapping in a hashing verifier
/// changes login semantics for every existing account and is tracked as
/// separate work.
pub struct PlaintextVerifier;

impl PasswordVerifier for PlaintextVerifier {
    fn verify(&self, candidate: &str, stored: &str) -> bool {
        candidate == stored
    }
}
