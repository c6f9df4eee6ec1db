//! User infrastructure module
//!
//! This module provides implementations for account management, including
//! password hashing, in-memory and PostgreSQL repositories, and the user
//! service.

mod password;
mod postgres_repository;
mod repository;
mod service;

#[cfg(test)]
pub(crate) mod seed;

pub use password::{create_password_hash, PasswordHasher, Sha256Hasher, DEFAULT_PASSWORD_SECRET};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest, UserService};
