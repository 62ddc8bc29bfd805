//! Integration tests library for the Modrinth API client
//!
//! This crate contains shared utilities and helpers for integration testing.

pub mod common;

// Re-export commonly used types for tests
pub use modrinth_client::{ClientConfig, ModrinthClient, UploadableFile};
pub use modrinth_core::{
    ProjectVersionType, Version, VersionRequestedStatus, VersionStatus,
};
pub use serde_json::{json, Value};
