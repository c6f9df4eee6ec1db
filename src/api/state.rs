//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{User, UserRepository, UserSelector, UserStatus};
use crate::domain::DomainError;
use crate::infrastructure::user::{
    CreateUserRequest, PasswordHasher, UpdatePasswordRequest, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn update(
        &self,
        selector: &UserSelector,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError>;
    async fn find_one(&self, selector: &UserSelector) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn list(&self, status: Option<UserStatus>) -> Result<Vec<User>, DomainError>;
    async fn count(&self, status: Option<UserStatus>) -> Result<usize, DomainError>;
    async fn delete(&self, selector: &UserSelector) -> Result<bool, DomainError>;
    async fn activate(&self, selector: &UserSelector) -> Result<User, DomainError>;
    async fn get_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;
    async fn update_password(
        &self,
        selector: &UserSelector,
        request: UpdatePasswordRequest,
    ) -> Result<User, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn update(
        &self,
        selector: &UserSelector,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        UserService::update(self, selector, request).await
    }

    async fn find_one(&self, selector: &UserSelector) -> Result<Option<User>, DomainError> {
        UserService::find_one(self, selector).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        UserService::find_by_email(self, email).await
    }

    async fn list(&self, status: Option<UserStatus>) -> Result<Vec<User>, DomainError> {
        UserService::list(self, status).await
    }

    async fn count(&self, status: Option<UserStatus>) -> Result<usize, DomainError> {
        UserService::count(self, status).await
    }

    async fn delete(&self, selector: &UserSelector) -> Result<bool, DomainError> {
        UserService::delete(self, selector).await
    }

    async fn activate(&self, selector: &UserSelector) -> Result<User, DomainError> {
        UserService::activate(self, selector).await
    }

    async fn get_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        UserService::get_by_credentials(self, email, password).await
    }

    async fn update_password(
        &self,
        selector: &UserSelector,
        request: UpdatePasswordRequest,
    ) -> Result<User, DomainError> {
        UserService::update_password(self, selector, request).await
    }
}
