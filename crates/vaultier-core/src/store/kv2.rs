//! HTTP client for a KV v2 secrets engine.
//!
//! Blocking by design: the engine model is single-threaded, sequential,
//! blocking I/O with no parallel fetch. Authentication is LDAP login
//! exchanging credentials for a client token sent on every request.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, VaultierError};

use super::traits::StoreClient;
use super::types::{Secret, VersionRecord};

/// Connection parameters for a KV v2 store.
#[derive(Debug, Clone)]
pub struct Kv2Config {
    /// Base URL of the store, e.g. `https://vault.example.com:8200`.
    pub url: String,

    /// Namespace sent as `X-Vault-Namespace` on every request.
    pub namespace: String,

    /// Mountpoint of the secrets engine.
    pub mount_point: String,
}

/// Authenticated client for one KV v2 mountpoint.
pub struct Kv2Client {
    http: Client,
    config: Kv2Config,
    token: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: LoginAuth,
}

#[derive(Deserialize)]
struct LoginAuth {
    client_token: String,
}

#[derive(Deserialize)]
struct ReadResponse {
    data: Option<ReadData>,
}

#[derive(Deserialize)]
struct ReadData {
    data: Option<Secret>,
    metadata: Option<ReadMetadata>,
}

#[derive(Deserialize)]
struct ReadMetadata {
    version: u64,
    #[serde(default)]
    deletion_time: String,
}

#[derive(Deserialize)]
struct ListResponse {
    data: ListKeys,
}

#[derive(Deserialize)]
struct ListKeys {
    keys: Vec<String>,
}

impl Kv2Client {
    /// Establish a connection via LDAP login.
    pub fn login_ldap(config: Kv2Config, username: &str, password: &str) -> Result<Self> {
        let http = Client::new();
        let url = format!(
            "{}/v1/auth/ldap/login/{}",
            config.url.trim_end_matches('/'),
            username
        );
        let mut request = http
            .post(&url)
            .json(&serde_json::json!({ "password": password }));
        if !config.namespace.is_empty() {
            request = request.header("X-Vault-Namespace", &config.namespace);
        }
        let response = request.send()?;
        if !response.status().is_success() {
            return Err(VaultierError::Auth(format!(
                "LDAP login failed for {}: {}",
                username,
                response.status()
            )));
        }
        let login: LoginResponse = response.json()?;
        debug!(
            "connection established for user: {} at: {} namespace: {}",
            username, config.url, config.namespace
        );
        Ok(Self {
            http,
            config,
            token: login.auth.client_token,
        })
    }

    /// Point the client at a different secrets-engine mountpoint.
    pub fn set_mountpoint(&mut self, mount_point: impl Into<String>) {
        self.config.mount_point = mount_point.into();
        debug!("mountpoint: {}", self.config.mount_point);
    }

    pub fn mount_point(&self) -> &str {
        &self.config.mount_point
    }

    fn endpoint(&self, segment: &str, path: &str) -> String {
        format!(
            "{}/v1/{}/{}/{}",
            self.config.url.trim_end_matches('/'),
            self.config.mount_point,
            segment,
            path.trim_matches('/')
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .header("X-Vault-Token", &self.token);
        if !self.config.namespace.is_empty() {
            request = request.header("X-Vault-Namespace", &self.config.namespace);
        }
        request
    }

    fn store_error(context: &str, path: &str, status: StatusCode) -> VaultierError {
        VaultierError::Store(format!("{} at {} failed: {}", context, path, status))
    }
}

impl StoreClient for Kv2Client {
    fn read_version(&self, path: &str, version: Option<u64>) -> Result<Option<VersionRecord>> {
        let mut url = self.endpoint("data", path);
        if let Some(version) = version {
            url.push_str(&format!("?version={}", version));
        }
        let response = self.request(Method::GET, &url).send()?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::NOT_FOUND {
            return Err(Self::store_error("read", path, status));
        }
        // A deleted version also answers 404, but with metadata in the body;
        // only a body without metadata means "not a leaf".
        let body: ReadResponse = match response.json() {
            Ok(body) => body,
            Err(_) if status == StatusCode::NOT_FOUND => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let Some(data) = body.data else {
            return Ok(None);
        };
        let Some(metadata) = data.metadata else {
            return Ok(None);
        };
        let deletion_time = match metadata.deletion_time.is_empty() {
            true => None,
            false => Some(metadata.deletion_time),
        };
        Ok(Some(VersionRecord {
            version: metadata.version,
            data: data.data.unwrap_or_default(),
            deletion_time,
        }))
    }

    fn list_children(&self, path: &str) -> Result<Option<Vec<String>>> {
        let url = self.endpoint("metadata", path);
        let method = Method::from_bytes(b"LIST").map_err(|err| {
            VaultierError::Store(format!("LIST method unsupported: {}", err))
        })?;
        let response = self.request(method, &url).send()?;
        match response.status() {
            StatusCode::OK => {
                let body: ListResponse = response.json()?;
                Ok(Some(body.data.keys))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(Self::store_error("list", path, status)),
        }
    }

    fn write_version(&self, path: &str, secret: &Secret) -> Result<()> {
        let url = self.endpoint("data", path);
        let response = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "data": secret }))
            .send()?;
        if !response.status().is_success() {
            return Err(Self::store_error("write", path, response.status()));
        }
        Ok(())
    }

    fn delete_latest_version(&self, path: &str) -> Result<()> {
        let url = self.endpoint("data", path);
        let response = self.request(Method::DELETE, &url).send()?;
        if !response.status().is_success() {
            return Err(Self::store_error("delete", path, response.status()));
        }
        Ok(())
    }

    fn destroy_all(&self, path: &str) -> Result<()> {
        let url = self.endpoint("metadata", path);
        let response = self.request(Method::DELETE, &url).send()?;
        if !response.status().is_success() {
            return Err(Self::store_error("destroy", path, response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building() {
        let client = Kv2Client {
            http: Client::new(),
            config: Kv2Config {
                url: "https://vault.example.com:8200/".to_string(),
                namespace: "test".to_string(),
                mount_point: "secrets".to_string(),
            },
            token: "t".to_string(),
        };
        assert_eq!(
            client.endpoint("data", "app/db"),
            "https://vault.example.com:8200/v1/secrets/data/app/db"
        );
        assert_eq!(
            client.endpoint("metadata", "/app/"),
            "https://vault.example.com:8200/v1/secrets/metadata/app"
        );
    }
}
