//! Tree walker: leaf/folder resolution and recursive secret collection.
//!
//! A store path is either a leaf (one versioned secret) or a folder (child
//! paths); the store offers no direct way to ask which. `resolve` makes the
//! disambiguation an explicit tagged result: try leaf resolution first, fall
//! through to a folder listing, and report `Invalid` when both fail.

use tracing::trace;

use crate::error::{Result, VaultierError};
use crate::store::{join_paths, Secret, SecretsByPath, StoreClient};

/// What a store path resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The path holds exactly one versioned secret.
    Leaf(Secret),
    /// The path holds child paths, already joined onto the parent.
    Folder(Vec<String>),
    /// The path is neither a leaf nor listable.
    Invalid,
}

/// Defensive bound on folder nesting during collection.
const MAX_DEPTH: usize = 128;

/// Read-only traversal over the secret tree.
pub struct TreeWalker<'a> {
    store: &'a dyn StoreClient,
}

impl<'a> TreeWalker<'a> {
    pub fn new(store: &'a dyn StoreClient) -> Self {
        Self { store }
    }

    /// Resolve `path` to a leaf secret, a folder listing, or `Invalid`.
    pub fn resolve(&self, path: &str) -> Result<Resolved> {
        if let Some(secret) = self.latest_live_version(path)? {
            trace!("secret found at: {}", path);
            return Ok(Resolved::Leaf(secret));
        }
        trace!(
            "path {} did not take to a secret; trying to descend the tree",
            path
        );
        match self.store.list_children(path)? {
            Some(children) => Ok(Resolved::Folder(
                children
                    .iter()
                    .map(|child| join_paths(path, child))
                    .collect(),
            )),
            None => Ok(Resolved::Invalid),
        }
    }

    /// Find the most recent non-deleted version of the secret at `path`.
    ///
    /// Walks back one version at a time over deleted versions. Version
    /// numbers are contiguous, so the walk terminates at version 1; a chain
    /// with every version deleted is surfaced as `InvalidPath` rather than
    /// looping or guessing.
    fn latest_live_version(&self, path: &str) -> Result<Option<Secret>> {
        let Some(mut record) = self.store.read_version(path, None)? else {
            return Ok(None);
        };
        while record.is_deleted() {
            if record.version <= 1 {
                return Err(VaultierError::InvalidPath(format!(
                    "every version at {} is deleted",
                    path
                )));
            }
            let previous = record.version - 1;
            record = self.store.read_version(path, Some(previous))?.ok_or_else(|| {
                VaultierError::InvalidPath(format!("version {} missing at {}", previous, path))
            })?;
        }
        Ok(Some(record.data))
    }

    /// Collect every secret reachable under `path`, keyed by full path.
    ///
    /// Explicit worklist traversal, depth-first in listing order so log
    /// output is reproducible. `Invalid` anywhere aborts the whole
    /// collection; the tree is acyclic (paths strictly lengthen on descent)
    /// but depth is bounded defensively.
    pub fn collect(&self, path: &str) -> Result<SecretsByPath> {
        let mut secrets_by_path = SecretsByPath::new();
        let mut pending = vec![(path.to_string(), 0usize)];
        while let Some((current, depth)) = pending.pop() {
            if depth > MAX_DEPTH {
                return Err(VaultierError::InvalidPath(format!(
                    "tree deeper than {} levels at {}",
                    MAX_DEPTH, current
                )));
            }
            match self.resolve(&current)? {
                Resolved::Leaf(secret) => {
                    trace!("got secret at: {}", current);
                    secrets_by_path.insert(current, secret);
                }
                Resolved::Folder(children) => {
                    trace!("descending folder: {}", current);
                    // LIFO worklist: push in reverse to visit in listing order.
                    for child in children.into_iter().rev() {
                        pending.push((child, depth + 1));
                    }
                }
                Resolved::Invalid => {
                    return Err(VaultierError::InvalidPath(current));
                }
            }
        }
        Ok(secrets_by_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn secret(pairs: &[(&str, &str)]) -> Secret {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_leaf() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("user", "admin")]));

        let walker = TreeWalker::new(&store);
        assert_eq!(
            walker.resolve("app/db").expect("resolve"),
            Resolved::Leaf(secret(&[("user", "admin")]))
        );
    }

    #[test]
    fn test_resolve_folder_joins_children() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("a", "1")]));
        store.put("app/web/tls", secret(&[("b", "2")]));

        let walker = TreeWalker::new(&store);
        let resolved = walker.resolve("app").expect("resolve");
        assert_eq!(
            resolved,
            Resolved::Folder(vec!["app/db".to_string(), "app/web".to_string()])
        );
    }

    #[test]
    fn test_resolve_invalid() {
        let store = MemoryStore::new();
        let walker = TreeWalker::new(&store);
        assert_eq!(walker.resolve("nowhere").expect("resolve"), Resolved::Invalid);
    }

    #[test]
    fn test_resolve_walks_back_over_deleted_versions() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("v", "1")]));
        store.put("app/db", secret(&[("v", "2")]));
        store.put("app/db", secret(&[("v", "3")]));
        store.mark_deleted("app/db", 3);
        store.mark_deleted("app/db", 2);

        let walker = TreeWalker::new(&store);
        assert_eq!(
            walker.resolve("app/db").expect("resolve"),
            Resolved::Leaf(secret(&[("v", "1")]))
        );
    }

    #[test]
    fn test_resolve_errors_when_every_version_deleted() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("v", "1")]));
        store.mark_deleted("app/db", 1);

        let walker = TreeWalker::new(&store);
        let err = walker.resolve("app/db").expect_err("all versions deleted");
        assert!(matches!(err, VaultierError::InvalidPath(_)));
    }

    #[test]
    fn test_collect_one_entry_per_leaf() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("a", "1")]));
        store.put("app/web/tls", secret(&[("b", "2")]));
        store.put("app/web/basic", secret(&[("c", "3")]));

        let walker = TreeWalker::new(&store);
        let secrets = walker.collect("app").expect("collect");

        assert_eq!(secrets.len(), 3);
        assert_eq!(secrets["app/db"], secret(&[("a", "1")]));
        assert_eq!(secrets["app/web/tls"], secret(&[("b", "2")]));
        assert_eq!(secrets["app/web/basic"], secret(&[("c", "3")]));
    }

    #[test]
    fn test_collect_single_leaf() {
        let store = MemoryStore::new();
        store.put("app/db", secret(&[("a", "1")]));

        let walker = TreeWalker::new(&store);
        let secrets = walker.collect("app/db").expect("collect");
        assert_eq!(secrets.len(), 1);
        assert!(secrets.contains_key("app/db"));
    }

    #[test]
    fn test_collect_bounds_folder_depth() {
        let store = MemoryStore::new();
        let path = (0..140)
            .map(|i| format!("d{}", i))
            .collect::<Vec<_>>()
            .join("/");
        store.put(&path, secret(&[("a", "1")]));

        let walker = TreeWalker::new(&store);
        let err = walker.collect("d0").expect_err("deeper than the bound");
        assert!(matches!(err, VaultierError::InvalidPath(_)));
    }

    #[test]
    fn test_collect_invalid_path_is_fatal() {
        let store = MemoryStore::new();
        let walker = TreeWalker::new(&store);
        let err = walker.collect("nowhere").expect_err("invalid path");
        assert!(matches!(err, VaultierError::InvalidPath(_)));
    }
}
