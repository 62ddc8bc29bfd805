use std::io;
use std::path::{Path, PathBuf};

use modrinth_core::{Error, Result};
use reqwest::multipart::Part;
use reqwest::Body;

/// A file to attach to a version being created.
///
/// The data source makes ownership explicit: [`UploadSource::Memory`] wraps
/// bytes the caller already owns, while [`UploadSource::Path`] names a file
/// the client opens itself when the upload request is built. A path-backed
/// handle is closed when the request body has been consumed or the request
/// fails, never earlier.
#[derive(Debug, Clone)]
pub struct UploadableFile {
    file_name: String,
    source: UploadSource,
}

#[derive(Debug, Clone)]
pub enum UploadSource {
    /// In-memory contents supplied by the caller
    Memory(Vec<u8>),
    /// A file on disk, opened by the client at upload time
    Path(PathBuf),
}

impl UploadableFile {
    /// Wrap caller-owned bytes with the filename to upload them under
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            source: UploadSource::Memory(bytes.into()),
        }
    }

    /// Reference a file on disk. The upload filename is the path's final
    /// component. Fails eagerly if the file does not exist, rather than at
    /// upload time.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::validation(format!("path has no usable file name: {}", path.display()))
            })?
            .to_owned();

        if !path.is_file() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("upload file not found: {}", path.display()),
            )));
        }

        Ok(Self {
            file_name,
            source: UploadSource::Path(path.to_owned()),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &UploadSource {
        &self.source
    }

    /// Build the multipart part for this file. Path-backed sources are
    /// opened here and streamed; memory-backed sources are copied into the
    /// body.
    pub(crate) async fn to_part(&self) -> Result<Part> {
        let body = match &self.source {
            UploadSource::Memory(bytes) => Body::from(bytes.clone()),
            UploadSource::Path(path) => {
                let file = tokio::fs::File::open(path).await?;
                Body::from(file)
            }
        };

        Ok(Part::stream(body).file_name(self.file_name.clone()))
    }
}
