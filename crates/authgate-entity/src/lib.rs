//! # authgate-entity
//!
//! Domain entities shared between the persistence layer, the token
//! lifecycle core, and the HTTP boundary.

pub mod token;
pub mod user;

pub use token::{Revocation, TokenPair, TokenRecord};
pub use user::{NewUser, Principal, User, UserRole};
