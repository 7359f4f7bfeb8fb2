//! Store client trait definition.
//!
//! The `StoreClient` trait is the capability interface the engine consumes.
//! It deliberately mirrors a versioned key-value store organized as a tree of
//! paths: a path is either a leaf holding one versioned secret, or a folder
//! holding child paths. The store exposes no direct way to ask which; the
//! trait instead makes "not a leaf" and "not listable" explicit `None`
//! returns so the walker can disambiguate without catching error signals.

use crate::error::Result;

use super::types::{Secret, VersionRecord};

/// Capability interface to a versioned hierarchical secret store.
///
/// Implementations own the connection and the mountpoint; all paths are
/// relative to the configured mountpoint. All operations block until the
/// store responds.
pub trait StoreClient {
    /// Read one version of the secret at `path`.
    ///
    /// `version` of `None` reads the most recent version. Deleted versions
    /// are returned with their deletion time set rather than erroring, so
    /// callers can walk back through the version chain.
    ///
    /// Returns `Ok(None)` if `path` is structurally not a leaf (the store
    /// root, a folder, or nothing at all).
    fn read_version(&self, path: &str, version: Option<u64>) -> Result<Option<VersionRecord>>;

    /// List the immediate children of `path`.
    ///
    /// Folder children carry a trailing `/` per store convention. Returns
    /// `Ok(None)` if nothing is listable at `path`.
    fn list_children(&self, path: &str) -> Result<Option<Vec<String>>>;

    /// Write a new version at `path`, fully replacing the previous content.
    fn write_version(&self, path: &str, secret: &Secret) -> Result<()>;

    /// Soft-delete the latest version at `path`.
    fn delete_latest_version(&self, path: &str) -> Result<()>;

    /// Irreversibly remove all versions and metadata at `path`.
    fn destroy_all(&self, path: &str) -> Result<()>;
}
