//! # WellPath Shared Library
//!
//! Types and utilities shared by the WellPath API server:
//!
//! - `models`: database models (accounts, embedded goals, tips)
//! - `auth`: password hashing, JWT issuing/validation, auth context
//! - `db`: connection pool and migration helpers

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the WellPath shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
