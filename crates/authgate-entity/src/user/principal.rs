//! The authenticated-subject capability set.

use super::role::UserRole;

/// What the session core needs to know about an authenticated subject.
///
/// Implemented per concrete user type; credential verifiers hand one back
/// on success.
pub trait Principal: Send + Sync + std::fmt::Debug {
    /// The unique name tokens are issued for.
    fn username(&self) -> &str;

    /// Roles granted to the subject.
    fn authorities(&self) -> Vec<UserRole>;

    /// Whether the subject is locked out.
    fn is_locked(&self) -> bool;
}
