//! Infrastructure layer - Storage backends, hashing and service implementations

pub mod logging;
pub mod storage;
pub mod user;
