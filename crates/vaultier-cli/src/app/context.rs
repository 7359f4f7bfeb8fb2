//! Application context for the Vaultier CLI.
//!
//! Combines CLI arguments with a lazily-established, authenticated store
//! connection so handlers that never touch the store (completions, parse
//! errors) never prompt for a password.

use anyhow::anyhow;
use dialoguer::Password;
use once_cell::unsync::OnceCell;

use vaultier_core::store::{Kv2Client, Kv2Config};

use crate::cli::Cli;

/// Application context that bundles CLI args with the store connection.
pub struct AppContext<'a> {
    cli: &'a Cli,
    store: OnceCell<Kv2Client>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            store: OnceCell::new(),
        }
    }

    /// Get the authenticated store client, logging in on first use.
    pub fn store(&self) -> anyhow::Result<&Kv2Client> {
        self.store.get_or_try_init(|| connect(self.cli))
    }
}

fn connect(cli: &Cli) -> anyhow::Result<Kv2Client> {
    let username = cli
        .username
        .as_deref()
        .ok_or_else(|| anyhow!("No username provided (set --username or $USER)"))?;
    let password = match cli.password.as_deref() {
        Some(password) => password.to_string(),
        None => Password::new()
            .with_prompt(format!("Password for {}", username))
            .interact()?,
    };
    let config = Kv2Config {
        url: cli.vault_url.clone(),
        namespace: cli.vault_namespace.clone(),
        mount_point: cli.vault_mountpoint.clone(),
    };
    let client = Kv2Client::login_ldap(config, username, &password)?;
    Ok(client)
}
