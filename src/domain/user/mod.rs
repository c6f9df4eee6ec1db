//! User domain
//!
//! This module provides domain types and traits for account management,
//! including user entities, validation, and repository traits.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserRole, UserStatus};
pub use repository::{UserRepository, UserSelector};
pub use validation::{
    validate_display_name, validate_email, validate_password, UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;
