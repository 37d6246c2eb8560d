//! JWT token minting and validation (HS256)

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

pub const DEFAULT_ISSUER: &str = "BasicApi";
pub const DEFAULT_AUDIENCE: &str = "BasicApiUsers";
pub const DEFAULT_EXPIRATION_MINUTES: u64 = 60;
/// Longest accepted token lifetime (one year)
pub const MAX_EXPIRATION_MINUTES: u64 = 60 * 24 * 365;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID, decimal)
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: String,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Not before; always equal to `iat`
    pub nbf: i64,
    /// Expiration (Unix epoch seconds)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl JwtClaims {
    /// Create claims for a user issued at `now`
    pub fn new(user: &User, config: &JwtConfig, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let exp = i64::try_from(config.expiration_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "JWT lifetime of {} minutes is out of range",
                    config.expiration_minutes
                ))
            })?;

        Ok(Self {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        })
    }

    /// Expired once the current time reaches `exp`
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Issued in the future relative to the local clock
    pub fn is_premature(&self) -> bool {
        Utc::now().timestamp() < self.iat
    }

    /// Parse the subject back into a user ID
    pub fn subject_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// A freshly minted token and the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: JwtClaims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: u64,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl JwtConfig {
    /// Configuration with the given secret and default issuer, audience and lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_expiration_minutes(mut self, minutes: u64) -> Self {
        self.expiration_minutes = minutes;
        self
    }
}

/// Mints and validates signed, time-bound tokens
pub trait TokenAuthority: Send + Sync + Debug {
    /// Mint a token for a user
    fn mint(&self, user: &User) -> Result<IssuedToken, DomainError>;

    /// Validate a token and return its claims.
    ///
    /// Every rejection is reported as `DomainError::InvalidToken`.
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Token lifetime in minutes
    fn expiration_minutes(&self) -> u64;
}

/// HMAC-SHA256 token authority over a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service. An empty secret or a lifetime above
    /// `MAX_EXPIRATION_MINUTES` is a configuration error.
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::configuration("JWT secret key is not configured"));
        }

        if config.expiration_minutes > MAX_EXPIRATION_MINUTES {
            return Err(DomainError::configuration(format!(
                "JWT lifetime must be at most {} minutes, got {}",
                MAX_EXPIRATION_MINUTES, config.expiration_minutes
            )));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }
}

impl TokenAuthority for JwtService {
    fn mint(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let claims = JwtClaims::new(user, &self.config, Utc::now())?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))?;

        Ok(IssuedToken { token, claims })
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let claims = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "JWT rejected");
                DomainError::InvalidToken
            })?
            .claims;

        // The library treats `exp == now` as still valid; expiry here is inclusive.
        if claims.is_expired() || claims.is_premature() {
            debug!(sub = %claims.sub, "JWT outside its validity window");
            return Err(DomainError::InvalidToken);
        }

        Ok(claims)
    }

    fn expiration_minutes(&self) -> u64 {
        self.config.expiration_minutes
    }
}
