//! # authgate-auth
//!
//! The session/credential subsystem: issues, verifies, rotates, and revokes
//! signed bearer tokens, and locks accounts after repeated failures.
//!
//! ## Modules
//!
//! - `jwt`: signing key resolution, claims, and the HMAC token signer
//! - `store`: token pair persistence with atomic invalidation
//! - `directory`: user lookup and per-user atomic updates
//! - `lockout`: failed-login counting and account locking
//! - `password`: Argon2id hashing and registration policy
//! - `credential`: username/password verification against the directory
//! - `session`: login, refresh, logout, and bearer authorization

pub mod credential;
pub mod directory;
pub mod jwt;
pub mod lockout;
pub mod password;
pub mod session;
pub mod store;

pub use credential::{CredentialVerifier, DirectoryCredentialVerifier};
pub use directory::{MemoryUserDirectory, UserDirectory, UserRegistrar};
pub use jwt::{Claims, SigningKey, TokenError, TokenKind, TokenSigner};
pub use lockout::LoginAttemptTracker;
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{AuthSessionService, LogoutOutcome};
pub use store::{MemoryTokenStore, TokenStore};
