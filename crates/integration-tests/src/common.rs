//! Common utilities for integration tests

use std::sync::Once;

use modrinth_client::{ClientConfig, ModrinthClient};
use serde_json::{json, Value};

static TRACING: Once = Once::new();

/// Install a tracing subscriber once per test binary, honoring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Create a client pointed at a mock server
pub fn mock_server_client(base_url: &str) -> ModrinthClient {
    init_tracing();
    let config = ClientConfig {
        base_url: base_url.to_string(),
        ..ClientConfig::default()
    };
    ModrinthClient::with_config(config).expect("Failed to create ModrinthClient")
}

/// Full API-shaped version object for mock responses
pub fn version_fixture(id: &str, version_number: &str) -> Value {
    json!({
        "id": id,
        "project_id": "AABBCCDD",
        "author_id": "EEFFGGHH",
        "name": format!("Release {version_number}"),
        "version_number": version_number,
        "changelog": "Bug fixes and performance improvements",
        "dependencies": [
            {
                "project_id": "P7dR8mSH",
                "dependency_type": "required"
            }
        ],
        "game_versions": ["1.20.1", "1.20.2"],
        "version_type": "release",
        "loaders": ["fabric", "quilt"],
        "featured": true,
        "status": "listed",
        "requested_status": null,
        "date_published": "2023-09-01T12:00:00Z",
        "downloads": 4210,
        "files": [
            {
                "hashes": {
                    "sha1": "c84dd4b3580eb2ebd9a52db7a13bbaa2233d5a25",
                    "sha512": "d4bf53a97b51a1c5b7b1d6a2b3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2d4bf53a97b51a1c5b7b1d6a2b3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2"
                },
                "url": format!("https://cdn.modrinth.com/data/AABBCCDD/versions/{id}/mod.jar"),
                "filename": "mod.jar",
                "primary": true,
                "size": 1097270,
                "file_type": null
            }
        ]
    })
}
