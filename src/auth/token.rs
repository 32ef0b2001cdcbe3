use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of every issued credential, in seconds.
pub const TOKEN_TTL_SECS: i64 = 5 * 60;

/// The only algorithm accepted for signing and verification.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Source of "now" for expiry decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// JWT claims carried by every credential
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal id)
    pub sub: String,
    /// Expiry, epoch seconds
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret cannot be empty")]
    EmptySecret,
    #[error("principal id cannot be empty")]
    EmptySubject,
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("failed to parse token: {0}")]
    Malformed(String),
    #[error("unexpected signing algorithm")]
    UnexpectedAlgorithm,
    #[error("signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies credentials. The interceptor only talks to this trait.
pub trait TokenAuthority: Send + Sync {
    /// Mint a credential for `principal_id`, valid for [`TOKEN_TTL_SECS`].
    fn issue(&self, principal_id: &str) -> Result<String, TokenError>;

    /// Check signature, algorithm and expiry; return the subject.
    fn verify(&self, token: &str) -> Result<String, TokenError>;
}

/// HS256 token manager bound to a single shared secret.
///
/// Expiry is checked against the injected [`Clock`] rather than by
/// `jsonwebtoken`, so a token is rejected as soon as `now >= exp` with no leeway.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        })
    }
}

impl TokenAuthority for TokenManager {
    fn issue(&self, principal_id: &str) -> Result<String, TokenError> {
        if principal_id.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let claims = Claims {
            sub: principal_id.to_string(),
            exp: self.clock.now().timestamp() + TOKEN_TTL_SECS,
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        if self.clock.now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        if data.claims.sub.is_empty() {
            return Err(TokenError::Malformed("subject claim is empty".to_string()));
        }

        Ok(data.claims.sub)
    }
}
