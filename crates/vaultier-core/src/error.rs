//! Error types for Vaultier core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer will map these
//! to user-friendly messages.

use thiserror::Error;

/// Result type alias for Vaultier operations.
pub type Result<T> = std::result::Result<T, VaultierError>;

/// Core error type for Vaultier operations.
#[derive(Debug, Error)]
pub enum VaultierError {
    /// Path does not resolve to a leaf or a folder listing
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Leaf-only mutating operation requested on a folder without recursive=true
    #[error("{operation} is a leaf-level action by default; need a path to one secret at {path} or recursive=true")]
    UnsafeRecursiveOp { operation: String, path: String },

    /// Backup output file already present
    #[error("Backup file already exists: {0}")]
    BackupFileExists(String),

    /// Invalid migration rule pattern
    #[error("Invalid pattern: {0}")]
    Pattern(String),

    /// Remote store error
    #[error("Store error: {0}")]
    Store(String),

    /// Authentication error
    #[error("Auth error: {0}")]
    Auth(String),

    /// Serialization or file format error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for VaultierError {
    fn from(err: std::io::Error) -> Self {
        VaultierError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for VaultierError {
    fn from(err: serde_json::Error) -> Self {
        VaultierError::Serialization(err.to_string())
    }
}

impl From<regex::Error> for VaultierError {
    fn from(err: regex::Error) -> Self {
        VaultierError::Pattern(err.to_string())
    }
}

impl From<reqwest::Error> for VaultierError {
    fn from(err: reqwest::Error) -> Self {
        VaultierError::Store(err.to_string())
    }
}
