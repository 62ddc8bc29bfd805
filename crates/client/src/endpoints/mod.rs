pub mod version;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use modrinth_core::{Result, Version, VersionRequestedStatus};

use self::version::{CreateVersion, ProjectVersionFilter};

/// The version endpoint surface as a trait, so callers can substitute a
/// mock implementation at the seam.
#[async_trait]
pub trait VersionApi {
    /// Get a specific version by its id
    async fn get(&self, version_id: &str) -> Result<Version>;

    /// List a project's versions, optionally filtered
    async fn list_for_project(
        &self,
        slug_or_id: &str,
        filter: &ProjectVersionFilter,
    ) -> Result<Vec<Version>>;

    /// Get any number of versions by id, batching requests as needed
    async fn get_multiple(&self, ids: &[&str]) -> Result<Vec<Version>>;

    /// Get a version of a project by its version number
    async fn get_by_version_number(
        &self,
        slug_or_id: &str,
        version_number: &str,
    ) -> Result<Version>;

    /// Create a new version with a multipart file upload
    async fn create(&self, request: CreateVersion) -> Result<Version>;

    /// Delete a version by its id
    async fn delete(&self, version_id: &str) -> Result<()>;

    /// Schedule a deferred status transition for a version
    async fn schedule(
        &self,
        version_id: &str,
        time: DateTime<Utc>,
        requested_status: VersionRequestedStatus,
    ) -> Result<()>;
}
