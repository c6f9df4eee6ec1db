//! API request/response types

pub mod error;
pub mod json;
pub mod user;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use user::{
    CreateUserApiRequest, ListUsersQuery, ListUsersResponse, UpdatePasswordApiRequest,
    UpdateUserApiRequest, UserResponse,
};
