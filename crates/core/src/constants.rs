/// Base URL of the production Modrinth API, including the version prefix
pub const DEFAULT_API_BASE_URL: &str = "https://api.modrinth.com/v2";

/// Base URL of the staging Modrinth API
pub const STAGING_API_BASE_URL: &str = "https://staging-api.modrinth.com/v2";

/// Maximum number of version ids one `/versions` request accepts
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_REPOSITORY"),
    "/",
    env!("CARGO_PKG_VERSION"),
);
