//! In-memory versioned store backend.
//!
//! Mirrors the KV v2 semantics the engine depends on: per-leaf version
//! chains with soft-deletion markers, and folder listings derived from the
//! leaf key space (folders carry a trailing `/`). Keeps an operation log so
//! tests can assert write batching and dry-run behavior.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, VaultierError};

use super::traits::StoreClient;
use super::types::{Secret, VersionRecord};

/// A mutating call recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Write(String),
    DeleteLatest(String),
    DestroyAll(String),
}

#[derive(Debug, Clone)]
struct StoredVersion {
    data: Secret,
    deletion_time: Option<String>,
}

#[derive(Default)]
struct Inner {
    leaves: BTreeMap<String, Vec<StoredVersion>>,
    ops: Vec<StoreOp>,
}

/// In-memory `StoreClient` with versioned leaves and an op log.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| VaultierError::Store("memory store poisoned".to_string()))
    }

    /// Seed a new live version at `path` without recording an op.
    pub fn put(&self, path: &str, secret: Secret) {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner
            .leaves
            .entry(path.to_string())
            .or_default()
            .push(StoredVersion {
                data: secret,
                deletion_time: None,
            });
    }

    /// Mark one seeded version as deleted without recording an op.
    pub fn mark_deleted(&self, path: &str, version: u64) {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        if let Some(versions) = inner.leaves.get_mut(path) {
            if let Some(stored) = versions.get_mut((version as usize).saturating_sub(1)) {
                stored.deletion_time = Some("2024-01-01T00:00:00Z".to_string());
            }
        }
    }

    /// The latest version's data at `path`, deleted or not.
    pub fn latest(&self, path: &str) -> Option<Secret> {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner
            .leaves
            .get(path)
            .and_then(|versions| versions.last())
            .map(|stored| stored.data.clone())
    }

    /// Number of versions currently stored at `path` (0 when destroyed).
    pub fn version_count(&self, path: &str) -> usize {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner.leaves.get(path).map_or(0, Vec::len)
    }

    /// Every mutating call recorded so far, in order.
    pub fn ops(&self) -> Vec<StoreOp> {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner.ops.clone()
    }
}

impl StoreClient for MemoryStore {
    fn read_version(&self, path: &str, version: Option<u64>) -> Result<Option<VersionRecord>> {
        let inner = self.lock()?;
        let Some(versions) = inner.leaves.get(path) else {
            return Ok(None);
        };
        let index = match version {
            Some(0) => return Ok(None),
            Some(v) => v as usize - 1,
            None => versions.len().saturating_sub(1),
        };
        let Some(stored) = versions.get(index) else {
            return Ok(None);
        };
        Ok(Some(VersionRecord {
            version: index as u64 + 1,
            data: stored.data.clone(),
            deletion_time: stored.deletion_time.clone(),
        }))
    }

    fn list_children(&self, path: &str) -> Result<Option<Vec<String>>> {
        let inner = self.lock()?;
        let prefix = match path.trim_end_matches('/') {
            "" => String::new(),
            trimmed => format!("{}/", trimmed),
        };
        let mut children = BTreeSet::new();
        for leaf in inner.leaves.keys() {
            let Some(rest) = leaf.strip_prefix(&prefix) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            match rest.split_once('/') {
                Some((folder, _)) => children.insert(format!("{}/", folder)),
                None => children.insert(rest.to_string()),
            };
        }
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(children.into_iter().collect()))
    }

    fn write_version(&self, path: &str, secret: &Secret) -> Result<()> {
        let mut inner = self.lock()?;
        inner
            .leaves
            .entry(path.to_string())
            .or_default()
            .push(StoredVersion {
                data: secret.clone(),
                deletion_time: None,
            });
        inner.ops.push(StoreOp::Write(path.to_string()));
        Ok(())
    }

    fn delete_latest_version(&self, path: &str) -> Result<()> {
        let mut inner = self.lock()?;
        let versions = inner
            .leaves
            .get_mut(path)
            .ok_or_else(|| VaultierError::Store(format!("no secret at {}", path)))?;
        if let Some(stored) = versions.last_mut() {
            stored.deletion_time = Some("2024-01-01T00:00:00Z".to_string());
        }
        inner.ops.push(StoreOp::DeleteLatest(path.to_string()));
        Ok(())
    }

    fn destroy_all(&self, path: &str) -> Result<()> {
        let mut inner = self.lock()?;
        inner.leaves.remove(path);
        inner.ops.push(StoreOp::DestroyAll(path.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(pairs: &[(&str, &str)]) -> Secret {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_read_latest_and_specific_version() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("user", "admin")]));
        store.put("app/db", secret(&[("user", "admin2")]));

        let latest = store
            .read_version("app/db", None)
            .expect("read")
            .expect("leaf");
        assert_eq!(latest.version, 2);
        assert_eq!(latest.data.get("user").map(String::as_str), Some("admin2"));

        let first = store
            .read_version("app/db", Some(1))
            .expect("read")
            .expect("leaf");
        assert_eq!(first.data.get("user").map(String::as_str), Some("admin"));
    }

    #[test]
    fn test_read_non_leaf_is_none() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("user", "admin")]));

        assert!(store.read_version("app", None).expect("read").is_none());
        assert!(store.read_version("nowhere", None).expect("read").is_none());
    }

    #[test]
    fn test_list_children_marks_folders() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("a", "1")]));
        store.put("app/web/tls", secret(&[("b", "2")]));

        let children = store.list_children("app").expect("list").expect("folder");
        assert_eq!(children, vec!["db".to_string(), "web/".to_string()]);

        assert!(store.list_children("app/db").expect("list").is_none());
    }

    #[test]
    fn test_list_children_at_root() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("a", "1")]));

        let children = store.list_children("").expect("list").expect("folder");
        assert_eq!(children, vec!["app/".to_string()]);
    }

    #[test]
    fn test_destroy_removes_all_versions() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("a", "1")]));
        store.put("app/db", secret(&[("a", "2")]));

        store.destroy_all("app/db").expect("destroy");

        assert_eq!(store.version_count("app/db"), 0);
        assert_eq!(store.ops(), vec![StoreOp::DestroyAll("app/db".to_string())]);
    }
}
