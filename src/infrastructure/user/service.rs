//! User service for account management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{
    validate_display_name, validate_email, validate_password, User, UserRepository, UserRole,
    UserSelector, UserStatus,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
}

/// Partial update of a user; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
}

/// Request for changing a user's password
#[derive(Debug, Clone)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// User service for creation, updates and verification status
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Hash a plaintext password the way it is stored
    pub fn create_password_hash(&self, password: &str) -> String {
        self.hasher.hash(password)
    }

    /// Create a new user in `Pending` status
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        info!(email = %request.email, "Creating user");

        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(name) = &request.display_name {
            validate_display_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let password_hash = self.create_password_hash(&request.password);

        let user = User::new(request.email, password_hash)
            .with_display_name(request.display_name)
            .with_role(request.role.unwrap_or_default());

        self.repository.create(user).await
    }

    /// Apply a partial update to the selected user.
    ///
    /// Changing the email puts the account back into `Pending`.
    pub async fn update(
        &self,
        selector: &UserSelector,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        info!(selector = %selector, "Updating user");

        let mut user = self.require(selector).await?;

        if let Some(email) = request.email {
            if email != user.email() {
                validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;

                if self.repository.email_exists(&email).await? {
                    return Err(DomainError::conflict(format!(
                        "Email '{}' already exists",
                        email
                    )));
                }

                user.change_email(email);
                debug!(id = %user.id(), "Email changed, status reset to pending");
            }
        }

        if let Some(password) = request.password {
            validate_password(&password).map_err(|e| DomainError::validation(e.to_string()))?;
            user.set_password_hash(self.create_password_hash(&password));
        }

        if let Some(name) = request.display_name {
            validate_display_name(&name).map_err(|e| DomainError::validation(e.to_string()))?;
            user.set_display_name(Some(name));
        }

        if let Some(role) = request.role {
            user.set_role(role);
        }

        self.repository.update(&user).await
    }

    /// Get a single user
    pub async fn find_one(&self, selector: &UserSelector) -> Result<Option<User>, DomainError> {
        self.repository.find(selector).await
    }

    /// Get a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_email(email).await
    }

    /// List all users
    pub async fn list(&self, status: Option<UserStatus>) -> Result<Vec<User>, DomainError> {
        self.repository.list(status).await
    }

    /// Count users
    pub async fn count(&self, status: Option<UserStatus>) -> Result<usize, DomainError> {
        self.repository.count(status).await
    }

    /// Mark the user's email as verified
    pub async fn activate(&self, selector: &UserSelector) -> Result<User, DomainError> {
        info!(selector = %selector, "Activating user");

        let mut user = self.require(selector).await?;

        if user.status() == UserStatus::Active {
            return Ok(user);
        }

        user.activate();
        self.repository.update(&user).await
    }

    /// Look up a user by email and check the password.
    ///
    /// Unknown email and wrong password both yield `None`.
    pub async fn get_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.get_by_email(email).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            debug!(email = %email, "Password mismatch");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Change a user's password after checking the current one
    pub async fn update_password(
        &self,
        selector: &UserSelector,
        request: UpdatePasswordRequest,
    ) -> Result<User, DomainError> {
        info!(selector = %selector, "Updating password");

        let mut user = self.require(selector).await?;

        if !self.hasher.verify(&request.current_password, user.password_hash()) {
            return Err(DomainError::validation("Current password is incorrect"));
        }

        validate_password(&request.new_password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        user.set_password_hash(self.create_password_hash(&request.new_password));

        self.repository.update(&user).await
    }

    /// Delete a user
    pub async fn delete(&self, selector: &UserSelector) -> Result<bool, DomainError> {
        info!(selector = %selector, "Deleting user");

        match self.repository.find(selector).await? {
            Some(user) => self.repository.delete(user.id()).await,
            None => Ok(false),
        }
    }

    async fn require(&self, selector: &UserSelector) -> Result<User, DomainError> {
        self.repository
            .find(selector)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", selector)))
    }
}
