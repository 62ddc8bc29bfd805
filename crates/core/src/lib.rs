pub mod constants;
pub mod error;
pub mod models;

pub use error::{ApiError, Error, Result};

// Re-export commonly used models for convenience
pub use models::enums::{
    DependencyType, ProjectVersionType, VersionRequestedStatus, VersionStatus,
};
pub use models::version::{Dependency, FileHashes, Version, VersionFile};
