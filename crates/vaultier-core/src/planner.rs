//! Mutation planner: read-composing and mutating operations.
//!
//! All mutating operations take an explicit [`Mode`] and share the same
//! discipline: read first, stage the full set of writes, then either log the
//! masked plan (dry-run) or apply it. Staging deduplicates destinations so
//! each path receives exactly one write per logical operation.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, VaultierError};
use crate::router::{self, MigrationPlan, Subscheme};
use crate::store::types::masked_summary;
use crate::store::{Mode, Secret, SecretsByPath, StoreClient};
use crate::walker::{Resolved, TreeWalker};

/// Orchestrates get/set/add/delete/destroy/migrate atop the walker, the
/// router, and a store client. Holds no state across calls.
pub struct Planner<'a> {
    store: &'a dyn StoreClient,
    walker: TreeWalker<'a>,
}

impl<'a> Planner<'a> {
    pub fn new(store: &'a dyn StoreClient) -> Self {
        Self {
            store,
            walker: TreeWalker::new(store),
        }
    }

    /// Get secrets under `path`, recursively, keyed by full path.
    pub fn get(&self, path: &str) -> Result<SecretsByPath> {
        self.get_logged(path, true)
    }

    /// Internal reads suppress the info summary to avoid redundant logs.
    fn get_logged(&self, path: &str, log_info: bool) -> Result<SecretsByPath> {
        let secrets_by_path = self.walker.collect(path)?;
        if log_info {
            info!("got secrets: {}", masked_summary(&secrets_by_path));
        }
        Ok(secrets_by_path)
    }

    /// Produce a backup JSON file of everything under `path`.
    ///
    /// Refuses to overwrite: the output file must not already exist. Values
    /// are written in plaintext; this is the one deliberately unmasked
    /// surface.
    pub fn backup(&self, path: &str, output_file: &Path) -> Result<()> {
        let secrets_by_path = self.get(path)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(output_file)
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => {
                    VaultierError::BackupFileExists(output_file.display().to_string())
                }
                _ => err.into(),
            })?;
        serde_json::to_writer(file, &secrets_by_path)?;
        info!(
            "backup produced starting from path: {} and saved as: {}",
            path,
            output_file.display()
        );
        Ok(())
    }

    /// Replace the secret at `path` with exactly `secret`, as a new version.
    pub fn set(&self, path: &str, secret: &Secret, mode: Mode) -> Result<()> {
        let staged = single_entry(path, secret);
        if mode.is_dry_run() {
            info!("new version would be: {}", masked_summary(&staged));
            return Ok(());
        }
        self.store.write_version(path, secret)?;
        debug!("new version: {}", masked_summary(&staged));
        Ok(())
    }

    /// Merge `secret` into the existing secret at `path`, then set.
    ///
    /// Names in `secret` override same-named existing entries.
    pub fn add(&self, path: &str, secret: &Secret, mode: Mode) -> Result<()> {
        let mut merged = self
            .get_logged(path, false)?
            .remove(path)
            .unwrap_or_default();
        merged.extend(secret.clone());
        self.set(path, &merged, mode)
    }

    /// Delete the latest version at every leaf under `path`.
    ///
    /// Leaf-level by default: a folder path without `recursive` is rejected
    /// before anything is read for deletion.
    pub fn delete(&self, path: &str, recursive: bool, mode: Mode) -> Result<()> {
        self.ensure_leaf_or_recursive("delete", path, recursive)?;
        let secrets_by_path = self.get_logged(path, false)?;
        if mode.is_dry_run() {
            info!(
                "secrets would be deleted: {}",
                masked_summary(&secrets_by_path)
            );
            return Ok(());
        }
        for sub_path in secrets_by_path.keys() {
            self.store.delete_latest_version(sub_path)?;
            debug!("last version deleted at: {}", sub_path);
        }
        Ok(())
    }

    /// Destroy all versions and metadata at every leaf under `path`.
    /// No way back.
    pub fn destroy(&self, path: &str, recursive: bool, mode: Mode) -> Result<()> {
        self.ensure_leaf_or_recursive("destroy", path, recursive)?;
        let secrets_by_path = self.get_logged(path, false)?;
        if mode.is_dry_run() {
            info!(
                "secrets would be permanently destroyed: {}",
                masked_summary(&secrets_by_path)
            );
            return Ok(());
        }
        for sub_path in secrets_by_path.keys() {
            self.store.destroy_all(sub_path)?;
            debug!("destroyed secrets at: {}", sub_path);
        }
        Ok(())
    }

    /// Migrate every secret under `old_path` to destinations under
    /// `new_path` chosen by the subschemes.
    ///
    /// Entries are staged by destination before any write, so several
    /// secrets routed to the same path merge into a single new version
    /// instead of one version per secret. Destinations get a brand-new
    /// version; pre-existing destination content is not merged in. Unmatched
    /// secrets are dropped from the migration.
    pub fn migrate(
        &self,
        old_path: &str,
        new_path: &str,
        subschemes: Option<&[Subscheme]>,
        mode: Mode,
    ) -> Result<()> {
        let mut staged = SecretsByPath::new();
        for (_, secret) in self.get_logged(old_path, false)? {
            for (secret_name, secret_value) in secret {
                match router::route(&secret_name, new_path, subschemes)? {
                    Some(destination) => {
                        debug!(
                            "secret: {} found and new path would be assigned: {}",
                            secret_name, destination
                        );
                        staged
                            .entry(destination)
                            .or_default()
                            .insert(secret_name, secret_value);
                    }
                    None => {
                        debug!("secret: {} would be dropped from migration", secret_name);
                    }
                }
            }
        }
        if mode.is_dry_run() {
            info!("migration resume: {}", masked_summary(&staged));
            return Ok(());
        }
        for (destination, secret) in &staged {
            self.set(destination, secret, Mode::Apply)?;
        }
        debug!("migration from: {} completed", old_path);
        Ok(())
    }

    /// Run every migration in `plan`, then destroy every source path.
    ///
    /// Two independent fallible phases with no rollback: a failed migration
    /// leaves earlier sources un-destroyed; a failed destroy leaves data
    /// duplicated at its destination. Handle with care.
    pub fn migrate_and_destroy(&self, plan: &MigrationPlan, mode: Mode) -> Result<()> {
        for scheme in &plan.schemes {
            self.migrate(
                &scheme.from_path,
                &scheme.to_path,
                scheme.subschemes.as_deref(),
                mode,
            )?;
        }
        for scheme in &plan.schemes {
            self.destroy(&scheme.from_path, true, mode)?;
        }
        Ok(())
    }

    /// Reject leaf-level operations on folder paths unless `recursive`.
    fn ensure_leaf_or_recursive(&self, operation: &str, path: &str, recursive: bool) -> Result<()> {
        if recursive {
            return Ok(());
        }
        match self.walker.resolve(path)? {
            Resolved::Leaf(_) => Ok(()),
            Resolved::Folder(_) => Err(VaultierError::UnsafeRecursiveOp {
                operation: operation.to_string(),
                path: path.to_string(),
            }),
            Resolved::Invalid => Err(VaultierError::InvalidPath(path.to_string())),
        }
    }
}

fn single_entry(path: &str, secret: &Secret) -> SecretsByPath {
    let mut staged = SecretsByPath::new();
    staged.insert(path.to_string(), secret.clone());
    staged
}
