//! Deterministic user fixtures for tests

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;
use super::service::CreateUserRequest;

pub const SEED_PASSWORD: &str = "My5up3r5tr0ngP@55w0rd";

/// Users inserted by [`UserSeedService::setup`]
#[derive(Debug, Clone)]
pub struct SeedEntities {
    pub users: Vec<User>,
}

/// Build a valid create request with a unique email unless one is given
pub fn generate_user_create_request(email: Option<&str>) -> CreateUserRequest {
    CreateUserRequest {
        email: email
            .map(String::from)
            .unwrap_or_else(|| format!("trejgun+{}@gmail.com", uuid::Uuid::new_v4())),
        password: SEED_PASSWORD.to_string(),
        display_name: Some("Trej Gun".to_string()),
        role: None,
    }
}

/// Populates and removes fixture users against a repository
#[derive(Debug)]
pub struct UserSeedService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    seeded: Mutex<Vec<UserId>>,
}

impl<R: UserRepository, H: PasswordHasher> UserSeedService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            seeded: Mutex::new(Vec::new()),
        }
    }

    /// Insert two users: the first already verified, the second pending
    pub async fn setup(&self) -> Result<SeedEntities, DomainError> {
        let password_hash = self.hasher.hash(SEED_PASSWORD);

        let mut first = User::new("trejgun+seed-a@gmail.com", password_hash.clone())
            .with_display_name(Some("Seed A".to_string()));
        first.activate();

        let second = User::new("trejgun+seed-b@gmail.com", password_hash)
            .with_display_name(Some("Seed B".to_string()));

        let mut users = Vec::with_capacity(2);
        let mut seeded = self.seeded.lock().await;

        for user in [first, second] {
            let user = self.repository.create(user).await?;
            seeded.push(*user.id());
            users.push(user);
        }

        Ok(SeedEntities { users })
    }

    /// Remove every user inserted by `setup`; safe to call repeatedly
    pub async fn tear_down(&self) -> Result<(), DomainError> {
        let mut seeded = self.seeded.lock().await;

        for id in seeded.drain(..) {
            self.repository.delete(&id).await?;
        }

        Ok(())
    }
}
