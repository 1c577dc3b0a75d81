//! Issued token pairs and their persisted records.

pub mod model;

pub use model::{Revocation, TokenPair, TokenRecord};
