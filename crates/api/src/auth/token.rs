//! HS256 session tokens.
//!
//! Every login issues a signed token whose `jti` claim is registered in
//! the `sessions` table; logout revokes the row, so a token is live only
//! while both its signature/expiry and its session row are valid. No
//! refresh or renewal exists -- the signed expiry is the session lifetime.

use bildir_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The staff account's database id; `0` for the shared-admin identity.
    pub sub: DbId,
    /// Identity class: `"admin"` or `"staff"`.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier, registered server-side for revocation.
    pub jti: String,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 12).
    pub ttl_hours: i64,
}

/// Default session lifetime in hours.
const DEFAULT_TTL_HOURS: i64 = 12;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `SESSION_SECRET`    | **yes**  | --      |
    /// | `SESSION_TTL_HOURS` | no       | `12`    |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        Self { secret, ttl_hours }
    }
}

/// A freshly issued token plus the fields its session row needs.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_at: Timestamp,
}

/// Sign a new session token for the given identity.
pub fn issue_token(
    user_id: DbId,
    role: &str,
    config: &SessionConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::hours(config.ttl_hours);
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: jti.clone(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken {
        token,
        jti,
        expires_at,
    })
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry; the caller still has to check the
/// session row for revocation.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
