//! # Store Errors
//!
//! The closed domain-error taxonomy reported by the resource store. The
//! gateway matches these exhaustively when choosing a transport status, so a
//! new kind of failure is a compile-time-visible addition.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Resource kinds managed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Database,
    RetentionPolicy,
    DataNode,
    Shard,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::User => "user",
            Resource::Database => "database",
            Resource::RetentionPolicy => "retention policy",
            Resource::DataNode => "data node",
            Resource::Shard => "shard",
        };
        f.write_str(name)
    }
}

/// Domain errors surfaced by the resource store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The named resource does not exist
    #[error("{0} not found")]
    NotFound(Resource),

    /// A resource with the same key already exists
    #[error("{0} exists")]
    AlreadyExists(Resource),

    /// Unknown user or wrong password (generic - never says which)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Any failure outside the closed taxonomy
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_wire_safe() {
        assert_eq!(
            StoreError::NotFound(Resource::Database).to_string(),
            "database not found"
        );
        assert_eq!(
            StoreError::AlreadyExists(Resource::Database).to_string(),
            "database exists"
        );
        assert_eq!(
            StoreError::NotFound(Resource::RetentionPolicy).to_string(),
            "retention policy not found"
        );
        assert_eq!(
            StoreError::AlreadyExists(Resource::DataNode).to_string(),
            "data node exists"
        );
    }

    #[test]
    fn test_invalid_credentials_does_not_leak_which_check_failed() {
        let msg = StoreError::InvalidCredentials.to_string();
        assert!(!msg.contains("user"));
        assert!(!msg.contains("password"));
    }
}
