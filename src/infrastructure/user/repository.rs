//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository, UserStatus};
use crate::domain::DomainError;

/// Users keyed by id plus the email -> id index, guarded together
#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    email_index: HashMap<String, UserId>,
}

impl UserTable {
    fn email_taken(&self, email: &str) -> Result<(), DomainError> {
        if self.email_index.contains_key(email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                email
            )));
        }
        Ok(())
    }
}

/// In-memory implementation of UserRepository.
///
/// A single lock covers both maps, so the uniqueness check and the insert
/// happen in one critical section.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.users.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .email_index
            .get(email)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.users.contains_key(user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }
        table.email_taken(user.email())?;

        table.email_index.insert(user.email().to_string(), *user.id());
        table.users.insert(*user.id(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let old_email = table
            .users
            .get(user.id())
            .map(|u| u.email().to_string())
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user.id())))?;

        if old_email != user.email() {
            table.email_taken(user.email())?;
            table.email_index.remove(&old_email);
            table.email_index.insert(user.email().to_string(), *user.id());
        }

        table.users.insert(*user.id(), user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;

        match table.users.remove(id) {
            Some(user) => {
                table.email_index.remove(user.email());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, status: Option<UserStatus>) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;

        let mut result: Vec<User> = table
            .users
            .values()
            .filter(|u| status.is_none_or(|s| u.status() == s))
            .cloned()
            .collect();

        result.sort_by_key(|u| u.created_at());

        Ok(result)
    }

    async fn count(&self, status: Option<UserStatus>) -> Result<usize, DomainError> {
        let table = self.table.read().await;

        let count = table
            .users
            .values()
            .filter(|u| status.is_none_or(|s| u.status() == s))
            .count();

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn create_test_user(email: &str) -> User {
        User::new(email, "hashed_password")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice@example.com");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice@example.com");
        let id = *user.id();

        repo.create(user).await.unwrap();

        let retrieved = repo.get_by_email("alice@example.com").await.unwrap();
        assert_eq!(retrieved.unwrap().id(), &id);

        let not_found = repo.get_by_email("nobody@example.com").await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_test_user("same@example.com")).await.unwrap();

        let result = repo.create(create_test_user("same@example.com")).await;
        assert!(result.unwrap_err().is_conflict());
        assert_eq!(repo.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_moves_email_index() {
        let repo = InMemoryUserRepository::new();
        let mut user = create_test_user("old@example.com");

        repo.create(user.clone()).await.unwrap();

        user.change_email("new@example.com");
        repo.update(&user).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.email(), "new@example.com");

        assert!(repo.get_by_email("old@example.com").await.unwrap().is_none());
        assert!(repo.get_by_email("new@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let repo = InMemoryUserRepository::new();
        let user1 = create_test_user("user1@example.com");
        let mut user2 = create_test_user("user2@example.com");

        repo.create(user1).await.unwrap();
        repo.create(user2.clone()).await.unwrap();

        user2.change_email("user1@example.com");

        let result = repo.update(&user2).await;
        assert!(result.unwrap_err().is_conflict());

        let stored = repo.get(user2.id()).await.unwrap().unwrap();
        assert_eq!(stored.email(), "user2@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("ghost@example.com");

        let result = repo.update(&user).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice@example.com");

        repo.create(user.clone()).await.unwrap();

        assert!(repo.delete(user.id()).await.unwrap());
        assert!(!repo.delete(user.id()).await.unwrap());
        assert!(repo.get(user.id()).await.unwrap().is_none());

        // Email should be free again
        assert!(!repo.email_exists("alice@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_and_count_by_status() {
        let repo = InMemoryUserRepository::new();
        let mut active = create_test_user("active@example.com");
        active.activate();

        repo.create(active).await.unwrap();
        repo.create(create_test_user("pending@example.com")).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        assert_eq!(repo.count(Some(UserStatus::Active)).await.unwrap(), 1);

        let pending = repo.list(Some(UserStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].email(), "pending@example.com");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lookups_and_inserts_complete() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.create(create_test_user("seed@example.com")).await.unwrap();

        let tasks: Vec<_> = (0..32)
            .map(|task| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    for i in 0..200 {
                        if i % 2 == 0 {
                            let found = repo.get_by_email("seed@example.com").await.unwrap();
                            assert!(found.is_some());
                        } else {
                            let email = format!("user-{}-{}@example.com", task, i);
                            repo.create(create_test_user(&email)).await.unwrap();
                        }
                    }
                })
            })
            .collect();

        tokio::time::timeout(Duration::from_secs(20), async {
            for task in tasks {
                task.await.unwrap();
            }
        })
        .await
        .expect("store stalled under concurrent lookups and inserts");

        assert_eq!(repo.count(None).await.unwrap(), 1 + 32 * 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_same_email_has_one_winner() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(create_test_user("race@example.com")).await
                })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => {
                    assert!(e.is_conflict());
                    conflicts += 1;
                }
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(repo.count(None).await.unwrap(), 1);
    }
}
