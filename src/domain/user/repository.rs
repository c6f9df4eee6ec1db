//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId, UserStatus};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Identifies a single user for lookups and updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSelector {
    Id(UserId),
    Email(String),
}

impl std::fmt::Display for UserSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={}", id),
            Self::Email(email) => write!(f, "email={}", email),
        }
    }
}

/// Repository trait for user storage.
///
/// Implementations must reject a `create` or `update` that would leave two
/// users with the same email, reporting it as `DomainError::Conflict`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user, returning whether it existed
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// List all users (optionally filtered by status)
    async fn list(&self, status: Option<UserStatus>) -> Result<Vec<User>, DomainError>;

    /// Count users (optionally filtered by status)
    async fn count(&self, status: Option<UserStatus>) -> Result<usize, DomainError>;

    /// Resolve a selector to a user
    async fn find(&self, selector: &UserSelector) -> Result<Option<User>, DomainError> {
        match selector {
            UserSelector::Id(id) => self.get(id).await,
            UserSelector::Email(email) => self.get_by_email(email).await,
        }
    }

    /// Check if an email is taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
