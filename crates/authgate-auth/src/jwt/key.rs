//! HMAC signing key resolution.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use authgate_core::config::{AuthConfig, SigningKeySource};
use authgate_core::error::AppError;

/// Minimum key length for HMAC-SHA256, in bytes.
pub const MIN_KEY_BYTES: usize = 32;

/// Immutable signing secret, resolved once at startup and shared by
/// reference with the token signer.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
    source: SigningKeySource,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("source", &self.source)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl SigningKey {
    /// Resolves the key named by the auth configuration.
    ///
    /// Fails when `configured` is selected without a usable secret.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        match config.signing_key {
            SigningKeySource::Ephemeral => Ok(Self::generate()),
            SigningKeySource::Configured => {
                let secret = config.signing_secret.as_deref().ok_or_else(|| {
                    AppError::configuration(
                        "auth.signing_secret is required when auth.signing_key = \"configured\"",
                    )
                })?;
                Self::from_base64(secret)
            }
        }
    }

    /// Generates a fresh random 256-bit key.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; MIN_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self {
            bytes,
            source: SigningKeySource::Ephemeral,
        }
    }

    /// Decodes a base64 secret of at least [`MIN_KEY_BYTES`] bytes.
    pub fn from_base64(secret: &str) -> Result<Self, AppError> {
        let bytes = STANDARD
            .decode(secret.trim())
            .map_err(|e| AppError::configuration(format!("Signing secret is not base64: {e}")))?;

        if bytes.len() < MIN_KEY_BYTES {
            return Err(AppError::configuration(format!(
                "Signing secret must decode to at least {MIN_KEY_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            bytes,
            source: SigningKeySource::Configured,
        })
    }

    /// Where this key came from.
    pub fn source(&self) -> SigningKeySource {
        self.source
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::error::ErrorKind;

    #[test]
    fn test_generated_keys_differ() {
        let a = SigningKey::generate();
        let b = SigningKey::generate();
        assert_eq!(a.as_bytes().len(), MIN_KEY_BYTES);
        assert_ne!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.source(), SigningKeySource::Ephemeral);
    }

    #[test]
    fn test_configured_requires_secret() {
        let config = AuthConfig {
            signing_key: SigningKeySource::Configured,
            signing_secret: None,
            ..AuthConfig::default()
        };
        let err = SigningKey::from_config(&config).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_configured_rejects_short_secret() {
        let short = STANDARD.encode([7u8; 16]);
        assert!(SigningKey::from_base64(&short).is_err());
    }

    #[test]
    fn test_configured_secret_is_used_verbatim() {
        let secret = STANDARD.encode([42u8; 32]);
        let config = AuthConfig {
            signing_key: SigningKeySource::Configured,
            signing_secret: Some(secret),
            ..AuthConfig::default()
        };
        let key = SigningKey::from_config(&config).unwrap();
        assert_eq!(key.as_bytes(), &[42u8; 32]);
        assert_eq!(key.source(), SigningKeySource::Configured);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = SigningKey::from_base64(&STANDARD.encode([9u8; 32])).unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("9, 9"));
    }
}
