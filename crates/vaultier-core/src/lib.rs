//! # Vaultier Core
//!
//! Core library for Vaultier - a CLI-first tool for managing hierarchical
//! secrets in a versioned key-value store.
//!
//! This crate provides the secret-tree traversal, transformation, and
//! migration engine independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **store**: Store capability trait, shared types, and client implementations
//! - **walker**: Leaf/folder resolution and recursive secret collection
//! - **router**: Pattern-based destination routing for migrations
//! - **planner**: Mutating operations with dry-run and write batching

pub mod error;
pub mod planner;
pub mod router;
pub mod store;
pub mod walker;

pub use error::{Result, VaultierError};
pub use planner::Planner;
pub use router::{MigrationPlan, Scheme, Subscheme};
pub use store::{hide_secrets, Mode, Secret, SecretsByPath, StoreClient};
pub use walker::{Resolved, TreeWalker};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
