//! Core data types shared across the engine.
//!
//! A "Secret" is a mapping identified by a store path, comprising pairs of
//! strings representing a name and a value. Whole read results, backups, and
//! migration staging all use the same `SecretsByPath` shape.

use std::collections::BTreeMap;

/// A single secret: name → value pairs stored at one leaf path.
///
/// Ordering carries no meaning; a `BTreeMap` keeps traversal output and log
/// lines reproducible across runs.
pub type Secret = BTreeMap<String, String>;

/// Secrets indexed by their full store path.
///
/// Built fresh per operation and discarded afterwards; never cached.
pub type SecretsByPath = BTreeMap<String, Secret>;

/// Placeholder substituted for every secret value in log output.
pub const MASK: &str = "***";

/// One stored version of a secret, with its deletion marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// Version number; versions are contiguous and start at 1.
    pub version: u64,

    /// The secret data. Empty when the version is deleted.
    pub data: Secret,

    /// Deletion timestamp; `None` means the version is live.
    pub deletion_time: Option<String>,
}

impl VersionRecord {
    /// Whether this version has been (soft-)deleted.
    pub fn is_deleted(&self) -> bool {
        self.deletion_time.is_some()
    }
}

/// Execution mode for mutating operations.
///
/// Threaded explicitly through every mutating call; there is no process-wide
/// dry-run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Perform the mutation.
    Apply,
    /// Compute and log the would-be mutation without touching the store.
    DryRun,
}

impl Mode {
    pub fn is_dry_run(self) -> bool {
        matches!(self, Mode::DryRun)
    }
}

/// Replace every secret value with a fixed placeholder, keys preserved.
///
/// All informational logging of secret content must pass through here.
pub fn hide_secrets(secrets_by_path: &SecretsByPath) -> SecretsByPath {
    secrets_by_path
        .iter()
        .map(|(path, secret)| {
            let masked = secret
                .keys()
                .map(|name| (name.clone(), MASK.to_string()))
                .collect();
            (path.clone(), masked)
        })
        .collect()
}

/// Render a masked `SecretsByPath` for a log line.
pub fn masked_summary(secrets_by_path: &SecretsByPath) -> String {
    serde_json::to_string(&hide_secrets(secrets_by_path)).unwrap_or_else(|_| "{}".to_string())
}

/// Join a store path and a child segment with a single `/`.
///
/// Folder listings follow the store convention of a trailing `/` on folder
/// names; the separator is normalized away here.
pub fn join_paths(base: &str, child: &str) -> String {
    let base = base.trim_end_matches('/');
    let child = child.trim_matches('/');
    if base.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", base, child)
    }
}
