//! HMAC-SHA256 token creation and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;

use super::claims::{Claims, TokenKind};
use super::key::SigningKey;

/// Why a token failed to sign or verify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signature does not match the process signing key.
    #[error("Invalid token signature")]
    InvalidSignature,
    /// The token's expiry has passed.
    #[error("Token has expired")]
    Expired,
    /// The token could not be parsed at all.
    #[error("Malformed token: {0}")]
    Malformed(String),
    /// A valid token of the wrong kind was presented.
    #[error("Invalid token type: expected {expected} token, found {found}")]
    WrongTokenType {
        /// Kind the caller asked for.
        expected: TokenKind,
        /// Kind embedded in the token.
        found: TokenKind,
    },
    /// Encoding the claims failed.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => AppError::internal(err.to_string()),
            _ => AppError::invalid_token(err.to_string()),
        }
    }
}

/// Creates and verifies signed, time-bounded bearer tokens.
///
/// Holds only immutable key material, so one instance is shared freely
/// across concurrent callers.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from a resolved key and the auth configuration.
    ///
    /// Fails with a configuration error when a TTL does not fit in a
    /// timestamp range.
    pub fn new(key: &SigningKey, config: &AuthConfig) -> AppResult<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        let access_ttl = i64::try_from(config.access_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.access_ttl_hours is out of range: {}",
                    config.access_ttl_hours
                ))
            })?;
        let refresh_ttl = i32::try_from(config.refresh_ttl_multiplier)
            .ok()
            .and_then(|factor| access_ttl.checked_mul(factor))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.refresh_ttl_multiplier is out of range: {}",
                    config.refresh_ttl_multiplier
                ))
            })?;

        // Both expiries must be representable from now on.
        let now = Utc::now();
        if now.checked_add_signed(refresh_ttl).is_none()
            || now.checked_add_signed(access_ttl).is_none()
        {
            return Err(AppError::configuration(
                "Token lifetimes exceed the representable time range",
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            access_ttl,
            refresh_ttl,
        })
    }

    /// Issues an access token for `subject`, expiring after the access TTL.
    pub fn issue_access_token(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, TokenKind::Access, self.access_ttl)
    }

    /// Issues a refresh token for `subject`, expiring after the refresh TTL.
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, TokenKind::Refresh, self.refresh_ttl)
    }

    /// Verifies signature and expiry of a token of any kind and returns its subject.
    pub fn verify_and_extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token, None).map(|claims| claims.sub)
    }

    /// Verifies a token and returns its claims.
    ///
    /// When `expected` is given, a token of the other kind is rejected.
    /// Parser failures never escape as anything other than [`TokenError`].
    pub fn verify(&self, token: &str, expected: Option<TokenKind>) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        let claims = data.claims;
        if let Some(expected) = expected {
            if claims.token_type != expected {
                return Err(TokenError::WrongTokenType {
                    expected,
                    found: claims.token_type,
                });
            }
        }

        Ok(claims)
    }

    /// Access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Refresh token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    fn issue(&self, subject: &str, kind: TokenKind, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(ttl)
                .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?
                .timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: kind,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}
