//! Stateless session tokens (HS256-signed JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Signed claim set carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account email.
    pub sub: String,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Issue time, unix seconds.
    pub iat: i64,
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies session tokens.
///
/// Verification only needs the shared secret, so any instance configured
/// with the same secret accepts tokens issued by another.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    /// Creates a token service signing with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `lifetime` does not fit a signed
    /// time delta.
    pub fn new(secret: &str, lifetime: std::time::Duration) -> Result<Self, AppError> {
        let lifetime = Duration::from_std(lifetime).map_err(|_| {
            AppError::internal(format!("token lifetime {:?} is out of range", lifetime))
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        })
    }

    /// Signs a token for `subject` that expires one lifetime from now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Token`] if signing fails, or [`AppError::Internal`]
    /// if the expiry overflows the calendar.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, Utc::now())
    }

    fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, AppError> {
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::internal("token expiry is out of range"))?;
        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies signature, algorithm, and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for any token that is malformed,
    /// expired, signed with another key, or signed with another algorithm.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(e.to_string()))
    }
}
