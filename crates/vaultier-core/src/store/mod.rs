//! Store layer: capability trait, shared types, and client implementations.

pub mod kv2;
pub mod memory;
pub mod traits;
pub mod types;

pub use kv2::{Kv2Client, Kv2Config};
pub use memory::{MemoryStore, StoreOp};
pub use traits::StoreClient;
pub use types::{hide_secrets, join_paths, Mode, Secret, SecretsByPath, VersionRecord};
