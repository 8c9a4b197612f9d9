//! Session tokens for site profiles.
//!
//! A login yields a short-lived HS256 access token whose [`Claims`] carry
//! the profile id and [`UserRole`], plus an opaque refresh token. The
//! refresh token is only ever persisted as its SHA-256 hex digest.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use site_core::status::UserRole;
use site_core::types::DbId;
use uuid::Uuid;

use crate::config::env_or;

/// Seconds of clock skew tolerated when checking `exp`.
const LEEWAY_SECS: u64 = 30;

/// Access token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Profile id.
    pub sub: DbId,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn issue(user_id: DbId, role: UserRole, ttl_secs: i64, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            sub: user_id,
            role,
            exp: iat + ttl_secs,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (15) and
    /// `JWT_REFRESH_EXPIRY_DAYS` (7).
    ///
    /// # Panics
    ///
    /// Panics if the secret is missing or empty, or an expiry is not an
    /// integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_or("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    pub fn refresh_expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.refresh_token_expiry_days)
    }
}

/// Sign an access token for a profile.
pub fn generate_access_token(
    user_id: DbId,
    role: UserRole,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, role, config.access_ttl_secs(), Utc::now());
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry of an access token.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = LEEWAY_SECS;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// A freshly minted refresh token. `plaintext` goes to the client, `hash`
/// into `user_sessions`.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = Uuid::new_v4().simple().to_string();
        let hash = hash_refresh_token(&plaintext);
        Self { plaintext, hash }
    }
}

pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "gatehouse-signing-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn security_guard_token_keeps_role() {
        let config = test_config();
        let token = generate_access_token(42, UserRole::Security, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, UserRole::Security);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let claims = Claims::issue(
            1,
            UserRole::Resident,
            60,
            Utc::now() - Duration::minutes(10),
        );
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let forged = JwtConfig {
            secret: "not-the-gatehouse-secret".to_string(),
            ..test_config()
        };
        let token = generate_access_token(1, UserRole::Admin, &forged).unwrap();
        assert!(validate_token(&token, &test_config()).is_err());
    }

    #[test]
    fn refresh_token_is_stored_as_sha256_hex() {
        let token = RefreshToken::generate();
        assert_eq!(token.hash, hash_refresh_token(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
        assert_ne!(token.hash, token.plaintext);
    }

    #[test]
    fn refresh_expiry_follows_config() {
        let now = Utc::now();
        assert_eq!(
            test_config().refresh_expires_at(now) - now,
            Duration::days(7)
        );
    }
}
