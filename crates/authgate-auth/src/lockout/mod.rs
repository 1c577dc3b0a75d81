//! Failed-login counting and account locking.

pub mod tracker;

pub use tracker::LoginAttemptTracker;
