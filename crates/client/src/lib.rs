pub mod client;
pub mod config;
pub mod endpoints;
mod error_handling;
pub mod upload;

pub use client::ModrinthClient;
pub use config::ClientConfig;
pub use endpoints::version::{CreateVersion, ProjectVersionFilter, VersionEndpoint};
pub use endpoints::VersionApi;
pub use upload::{UploadSource, UploadableFile};
