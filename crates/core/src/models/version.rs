use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::enums::{DependencyType, ProjectVersionType, VersionRequestedStatus, VersionStatus};

/// A release artifact of a project.
///
/// Created and owned entirely server-side; the client only reads it or
/// requests mutations through the version endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// Server-assigned identifier
    pub id: String,
    pub project_id: String,
    pub author_id: String,
    pub name: String,
    pub version_number: String,
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    pub game_versions: Vec<String>,
    pub version_type: ProjectVersionType,
    pub loaders: Vec<String>,
    pub featured: bool,
    pub status: VersionStatus,
    #[serde(default)]
    pub requested_status: Option<VersionRequestedStatus>,
    pub date_published: DateTime<Utc>,
    #[serde(default)]
    pub downloads: u64,
    pub files: Vec<VersionFile>,
}

impl Version {
    /// The file flagged as primary, or the first file if none is flagged
    pub fn primary_file(&self) -> Option<&VersionFile> {
        self.files
            .iter()
            .find(|file| file.primary)
            .or_else(|| self.files.first())
    }

    pub fn required_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|dependency| dependency.dependency_type == DependencyType::Required)
    }

    pub fn optional_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|dependency| dependency.dependency_type == DependencyType::Optional)
    }
}

/// One downloadable file attached to a version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionFile {
    pub hashes: FileHashes,
    pub url: Url,
    pub filename: String,
    pub primary: bool,
    /// Size in bytes
    pub size: u64,
    #[serde(default)]
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileHashes {
    pub sha1: String,
    pub sha512: String,
}

/// Reference to another project or version that a version depends on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub dependency_type: DependencyType,
}
