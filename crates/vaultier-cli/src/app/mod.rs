//! Application-level utilities for the Vaultier CLI.
//!
//! This module provides the application context that bundles CLI arguments
//! with the lazily-established store connection.

mod context;

pub use context::AppContext;
