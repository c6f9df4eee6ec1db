//! User request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserRole, UserStatus};
use crate::infrastructure::user::{CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest};

/// POST /users body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<CreateUserApiRequest> for CreateUserRequest {
    fn from(request: CreateUserApiRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            display_name: request.display_name,
            role: request.role,
        }
    }
}

/// PATCH /users/{id} body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserApiRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
}

impl From<UpdateUserApiRequest> for UpdateUserRequest {
    fn from(request: UpdateUserApiRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            display_name: request.display_name,
            role: request.role,
        }
    }
}

/// PUT /users/{id}/password body
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePasswordApiRequest {
    pub current_password: String,
    pub new_password: String,
}

impl From<UpdatePasswordApiRequest> for UpdatePasswordRequest {
    fn from(request: UpdatePasswordApiRequest) -> Self {
        Self {
            current_password: request.current_password,
            new_password: request.new_password,
        }
    }
}

/// GET /users query string; `email` narrows the result to that one user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub status: Option<UserStatus>,
    pub email: Option<String>,
}

/// User as exposed over HTTP; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            display_name: user.display_name().map(String::from),
            role: user.role(),
            status: user.status(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}
