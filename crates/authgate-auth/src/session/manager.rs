//! Session lifecycle: login, refresh rotation, logout, and authorization.

use std::sync::Arc;

use tracing::{info, warn};

use authgate_core::config::AuthConfig;
use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::token::{Revocation, TokenPair};
use authgate_entity::user::Principal;

use crate::credential::CredentialVerifier;
use crate::jwt::{Claims, TokenKind, TokenSigner};
use crate::lockout::LoginAttemptTracker;
use crate::store::TokenStore;

const BEARER_PREFIX: &str = "Bearer ";

/// Result of a logout that found its token record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The pair was valid and is now revoked.
    LoggedOut,
    /// The pair had already been revoked.
    AlreadyLoggedOut,
}

impl LogoutOutcome {
    /// Message returned to the client.
    pub fn message(&self) -> &'static str {
        match self {
            Self::LoggedOut => "Successfully logged out",
            Self::AlreadyLoggedOut => "You have already logged out",
        }
    }
}

/// Orchestrates the token pair lifecycle.
///
/// ```text
/// Unauthenticated --login--> Authenticated(pair)
/// Authenticated(old) --refresh--> Authenticated(new), old pair revoked
/// Authenticated --logout--> LoggedOut
/// ```
#[derive(Clone)]
pub struct AuthSessionService {
    signer: Arc<TokenSigner>,
    store: Arc<dyn TokenStore>,
    tracker: LoginAttemptTracker,
    verifier: Arc<dyn CredentialVerifier>,
    reuse_existing_session: bool,
    reset_failed_attempts_on_success: bool,
}

impl std::fmt::Debug for AuthSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionService")
            .field("signer", &self.signer)
            .field("tracker", &self.tracker)
            .field("reuse_existing_session", &self.reuse_existing_session)
            .field(
                "reset_failed_attempts_on_success",
                &self.reset_failed_attempts_on_success,
            )
            .finish()
    }
}

impl AuthSessionService {
    /// Creates the service from its collaborators.
    pub fn new(
        signer: Arc<TokenSigner>,
        store: Arc<dyn TokenStore>,
        tracker: LoginAttemptTracker,
        verifier: Arc<dyn CredentialVerifier>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            signer,
            store,
            tracker,
            verifier,
            reuse_existing_session: config.reuse_existing_session,
            reset_failed_attempts_on_success: config.reset_failed_attempts_on_success,
        }
    }

    /// Authenticates `username` and returns a token pair.
    ///
    /// 1. Blocked accounts are refused before credentials are looked at.
    /// 2. With session reuse on, an existing valid pair whose access token
    ///    still verifies is returned as is, without checking `secret`.
    /// 3. Otherwise the credential verifier runs; a rejection counts as a
    ///    failed attempt.
    /// 4. A fresh pair is issued and stored.
    pub async fn login(&self, username: &str, secret: &str) -> AppResult<TokenPair> {
        if self.tracker.is_blocked(username).await? {
            warn!(username = %username, "Login refused for blocked account");
            return Err(AppError::authentication(
                "Account is blocked due to multiple failed login attempts",
            ));
        }

        if self.reuse_existing_session {
            if let Some(pair) = self.reusable_pair(username).await? {
                info!(username = %username, "Login reused existing session");
                return Ok(pair);
            }
        }

        let principal = match self.verifier.verify(username, secret).await {
            Ok(principal) => principal,
            Err(e) if e.is(ErrorKind::Authentication) => {
                self.tracker.record_failure(username).await?;
                warn!(username = %username, reason = %e.message, "Login failed");
                return Err(AppError::authentication("Invalid username or password"));
            }
            Err(e) => return Err(e),
        };

        if self.reset_failed_attempts_on_success {
            self.tracker.reset(principal.username()).await?;
        }

        let pair = self.issue_pair(principal.username()).await?;
        info!(username = %principal.username(), "Login successful");
        Ok(pair)
    }

    /// Rotates a refresh token into a new pair.
    ///
    /// The presented pair is revoked in one atomic step; of several
    /// concurrent calls with the same token only one gets a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self
            .signer
            .verify(refresh_token, Some(TokenKind::Refresh))
            .map_err(|e| {
                warn!(reason = %e, "Refresh token rejected");
                AppError::invalid_token("Invalid refresh token")
            })?;

        match self.store.revoke(refresh_token).await? {
            Revocation::Revoked => {}
            Revocation::AlreadyRevoked => {
                warn!(username = %claims.sub, "Refresh token reused");
                return Err(AppError::invalid_token("Refresh token already used"));
            }
            Revocation::NotFound => {
                warn!(username = %claims.sub, "Refresh token not in store, rotating anyway");
            }
        }

        let pair = self.issue_pair(&claims.sub).await?;
        info!(username = %claims.sub, "Token refreshed");
        Ok(pair)
    }

    /// Revokes the pair owning `access_token`.
    ///
    /// An optional `Bearer ` prefix is accepted. An unknown token is
    /// `NotFound`; a token already revoked is reported, not failed.
    pub async fn logout(&self, access_token: &str) -> AppResult<LogoutOutcome> {
        let access_token = strip_bearer(access_token);

        let record = self
            .store
            .find_by_access_token(access_token)
            .await?
            .ok_or_else(|| AppError::not_found("Token not found"))?;

        if !record.valid {
            return Ok(LogoutOutcome::AlreadyLoggedOut);
        }

        let outcome = match self.store.revoke(access_token).await? {
            Revocation::Revoked => LogoutOutcome::LoggedOut,
            Revocation::AlreadyRevoked => LogoutOutcome::AlreadyLoggedOut,
            Revocation::NotFound => return Err(AppError::not_found("Token not found")),
        };

        info!(username = %record.username, "Logged out");
        Ok(outcome)
    }

    /// Authorizes a bearer access token for a protected request.
    ///
    /// The token must verify as an access token and its stored record must
    /// still be valid and belong to the same subject, so a revoked token is
    /// refused even before it expires.
    pub async fn authorize(&self, access_token: &str) -> AppResult<Claims> {
        let access_token = strip_bearer(access_token);
        let claims = self.signer.verify(access_token, Some(TokenKind::Access))?;

        let record = self
            .store
            .find_by_access_token(access_token)
            .await?
            .ok_or_else(|| AppError::invalid_token("Token is not recognized"))?;

        if !record.valid {
            return Err(AppError::invalid_token("Token has been revoked"));
        }
        if record.username != claims.sub {
            return Err(AppError::invalid_token("Token subject mismatch"));
        }

        Ok(claims)
    }

    /// The signer used by this service.
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    async fn reusable_pair(&self, username: &str) -> AppResult<Option<TokenPair>> {
        let records = self.store.find_valid_by_username(username).await?;
        Ok(records
            .into_iter()
            .find(|record| {
                self.signer
                    .verify(&record.access_token, Some(TokenKind::Access))
                    .is_ok()
            })
            .map(|record| record.pair()))
    }

    async fn issue_pair(&self, username: &str) -> AppResult<TokenPair> {
        let access_token = self.signer.issue_access_token(username)?;
        let refresh_token = self.signer.issue_refresh_token(username)?;
        let record = self
            .store
            .save(username, &access_token, &refresh_token)
            .await?;
        Ok(record.pair())
    }
}

fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim()
}
