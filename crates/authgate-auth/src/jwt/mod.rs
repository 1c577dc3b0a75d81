//! Signed bearer tokens: key material, claims, signing, and verification.

pub mod claims;
pub mod key;
pub mod signer;

pub use claims::{Claims, TokenKind};
pub use key::SigningKey;
pub use signer::{TokenError, TokenSigner};
