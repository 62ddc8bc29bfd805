use async_trait::async_trait;
use chrono::{DateTime, Utc};
use modrinth_core::constants::MAX_IDS_PER_REQUEST;
use modrinth_core::{
    Dependency, ProjectVersionType, Result, Version, VersionRequestedStatus, VersionStatus,
};
use reqwest::multipart::Form;
use serde::Serialize;
use tracing::debug;

use crate::client::ModrinthClient;
use crate::endpoints::VersionApi;
use crate::error_handling::{handle_http_response, parse_json_response, transport_error};
use crate::upload::UploadableFile;

/// Optional filters for listing a project's versions.
///
/// Each filter is sent as a query parameter only when it is set.
#[derive(Debug, Clone, Default)]
pub struct ProjectVersionFilter {
    /// Restrict to versions supporting any of these loaders
    pub loaders: Option<Vec<String>>,
    /// Restrict to versions supporting any of these game versions
    pub game_versions: Option<Vec<String>>,
    /// Restrict to featured or non-featured versions only
    pub featured: Option<bool>,
}

/// Parameters for creating a new version.
///
/// `project_id` must be an actual id; the create endpoint does not accept
/// slugs. At least one file is required and `primary_file` must name one of
/// the supplied files, both checked before anything is sent.
#[derive(Debug)]
pub struct CreateVersion {
    pub project_id: String,
    pub files: Vec<UploadableFile>,
    /// Filename of the file to mark as primary
    pub primary_file: String,
    pub name: String,
    pub version_number: String,
    pub changelog: Option<String>,
    pub dependencies: Vec<Dependency>,
    pub game_versions: Vec<String>,
    pub version_type: ProjectVersionType,
    pub loaders: Vec<String>,
    pub featured: bool,
    pub status: VersionStatus,
    pub requested_status: Option<VersionRequestedStatus>,
}

impl CreateVersion {
    fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(modrinth_core::Error::validation(
                "at least one file is required to create a version",
            ));
        }
        if !self
            .files
            .iter()
            .any(|file| file.file_name() == self.primary_file)
        {
            return Err(modrinth_core::Error::validation(format!(
                "primary file {:?} does not match any supplied file",
                self.primary_file
            )));
        }
        Ok(())
    }
}

/// JSON metadata part accompanying the file parts of a create request.
/// Enum fields serialize to their wire tokens.
#[derive(Debug, Serialize)]
struct CreateVersionData<'a> {
    project_id: &'a str,
    /// Names of the multipart parts carrying the files
    file_parts: Vec<&'a str>,
    primary_file: &'a str,
    name: &'a str,
    version_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    changelog: Option<&'a str>,
    dependencies: &'a [Dependency],
    game_versions: &'a [String],
    version_type: &'a ProjectVersionType,
    loaders: &'a [String],
    featured: bool,
    status: &'a VersionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_status: Option<&'a VersionRequestedStatus>,
}

impl<'a> CreateVersionData<'a> {
    fn new(request: &'a CreateVersion) -> Self {
        Self {
            project_id: &request.project_id,
            file_parts: request.files.iter().map(UploadableFile::file_name).collect(),
            primary_file: &request.primary_file,
            name: &request.name,
            version_number: &request.version_number,
            changelog: request.changelog.as_deref(),
            dependencies: &request.dependencies,
            game_versions: &request.game_versions,
            version_type: &request.version_type,
            loaders: &request.loaders,
            featured: request.featured,
            status: &request.status,
            requested_status: request.requested_status.as_ref(),
        }
    }
}

/// JSON body of a schedule request
#[derive(Debug, Serialize)]
struct ScheduleData<'a> {
    time: DateTime<Utc>,
    requested_status: &'a VersionRequestedStatus,
}

/// Split ids into consecutive chunks no larger than the per-request limit.
/// An empty input yields no chunks at all.
fn id_chunks<'a>(ids: &'a [&'a str]) -> std::slice::Chunks<'a, &'a str> {
    ids.chunks(MAX_IDS_PER_REQUEST)
}

/// Version resource operations, obtained from [`ModrinthClient::version`].
///
/// Every operation is an independent future; dropping it aborts the
/// in-flight request and, for batched calls, stops issuing further chunk
/// requests.
#[derive(Debug, Clone, Copy)]
pub struct VersionEndpoint<'a> {
    client: &'a ModrinthClient,
}

impl<'a> VersionEndpoint<'a> {
    pub(crate) fn new(client: &'a ModrinthClient) -> Self {
        Self { client }
    }

    /// Get a specific version by its id
    pub async fn get(&self, version_id: &str) -> Result<Version> {
        let url = self.client.api_url(&format!("version/{version_id}"));
        debug!(version_id, "fetching version");

        let response = self
            .client
            .inner_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error("get version", e))?;

        let response = handle_http_response(response, "get version").await?;
        parse_json_response(response, "get version").await
    }

    /// List a project's versions, optionally filtered by loader, game
    /// version and featured flag. Array-valued filters are sent as
    /// JSON-encoded query values, and each filter only when present.
    pub async fn list_for_project(
        &self,
        slug_or_id: &str,
        filter: &ProjectVersionFilter,
    ) -> Result<Vec<Version>> {
        let url = self.client.api_url(&format!("project/{slug_or_id}/version"));
        debug!(project = slug_or_id, "listing project versions");

        let mut request = self.client.inner_client().get(&url);
        if let Some(loaders) = &filter.loaders {
            request = request.query(&[("loaders", serde_json::to_string(loaders)?)]);
        }
        if let Some(game_versions) = &filter.game_versions {
            request = request.query(&[("game_versions", serde_json::to_string(game_versions)?)]);
        }
        if let Some(featured) = filter.featured {
            request = request.query(&[("featured", featured)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error("list project versions", e))?;

        let response = handle_http_response(response, "list project versions").await?;
        parse_json_response(response, "list project versions").await
    }

    /// Get any number of versions by id.
    ///
    /// The remote accepts at most [`MAX_IDS_PER_REQUEST`] ids per request,
    /// so the input is split into consecutive chunks, one request issued
    /// per chunk in input order, and the results concatenated. Any failed
    /// chunk fails the whole call; there is no partial result. Zero ids
    /// issue zero requests.
    pub async fn get_multiple(&self, ids: &[&str]) -> Result<Vec<Version>> {
        let url = self.client.api_url("versions");
        let mut versions = Vec::with_capacity(ids.len());

        for chunk in id_chunks(ids) {
            let ids_param = serde_json::to_string(chunk)?;
            debug!(batch_size = chunk.len(), "fetching version batch");

            let response = self
                .client
                .inner_client()
                .get(&url)
                .query(&[("ids", ids_param.as_str())])
                .send()
                .await
                .map_err(|e| transport_error("get multiple versions", e))?;

            let response = handle_http_response(response, "get multiple versions").await?;
            let batch: Vec<Version> =
                parse_json_response(response, "get multiple versions").await?;
            versions.extend(batch);
        }

        Ok(versions)
    }

    /// Get a version of a project by its version number.
    ///
    /// When several versions share the same number, the remote returns the
    /// earliest created one. That ordering is a remote-service contract,
    /// not something this client enforces.
    pub async fn get_by_version_number(
        &self,
        slug_or_id: &str,
        version_number: &str,
    ) -> Result<Version> {
        let url = self
            .client
            .api_url(&format!("project/{slug_or_id}/version/{version_number}"));
        debug!(project = slug_or_id, version_number, "fetching version by number");

        let response = self
            .client
            .inner_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error("get version by number", e))?;

        let response = handle_http_response(response, "get version by number").await?;
        parse_json_response(response, "get version by number").await
    }

    /// Create a new version.
    ///
    /// The metadata travels as a JSON `data` part and every file as its own
    /// part, named and uploaded under its filename. Validation failures
    /// (empty file list, unmatched primary filename) are reported before
    /// any request is sent.
    pub async fn create(&self, request: CreateVersion) -> Result<Version> {
        request.validate()?;

        let data = serde_json::to_string(&CreateVersionData::new(&request))?;
        let mut form = Form::new().text("data", data);
        for file in &request.files {
            form = form.part(file.file_name().to_owned(), file.to_part().await?);
        }

        let url = self.client.api_url("version");
        debug!(
            project_id = %request.project_id,
            files = request.files.len(),
            "creating version"
        );

        let response = self
            .client
            .inner_client()
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error("create version", e))?;

        let response = handle_http_response(response, "create version").await?;
        parse_json_response(response, "create version").await
    }

    /// Delete a version by its id. Deleting the same version twice makes
    /// the remote answer the second call with a 404.
    pub async fn delete(&self, version_id: &str) -> Result<()> {
        let url = self.client.api_url(&format!("version/{version_id}"));
        debug!(version_id, "deleting version");

        let response = self
            .client
            .inner_client()
            .delete(&url)
            .send()
            .await
            .map_err(|e| transport_error("delete version", e))?;

        handle_http_response(response, "delete version").await?;
        Ok(())
    }

    /// Schedule a deferred status transition for a version.
    ///
    /// The time is passed through unchanged; a time in the past is not
    /// rejected client-side, the remote refuses it instead.
    pub async fn schedule(
        &self,
        version_id: &str,
        time: DateTime<Utc>,
        requested_status: VersionRequestedStatus,
    ) -> Result<()> {
        let url = self.client.api_url(&format!("version/{version_id}/schedule"));
        debug!(version_id, status = %requested_status, "scheduling version");

        let body = ScheduleData {
            time,
            requested_status: &requested_status,
        };
        let response = self
            .client
            .inner_client()
            .patch(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("schedule version", e))?;

        handle_http_response(response, "schedule version").await?;
        Ok(())
    }
}

#[async_trait]
impl VersionApi for VersionEndpoint<'_> {
    async fn get(&self, version_id: &str) -> Result<Version> {
        VersionEndpoint::get(self, version_id).await
    }

    async fn list_for_project(
        &self,
        slug_or_id: &str,
        filter: &ProjectVersionFilter,
    ) -> Result<Vec<Version>> {
        VersionEndpoint::list_for_project(self, slug_or_id, filter).await
    }

    async fn get_multiple(&self, ids: &[&str]) -> Result<Vec<Version>> {
        VersionEndpoint::get_multiple(self, ids).await
    }

    async fn get_by_version_number(
        &self,
        slug_or_id: &str,
        version_number: &str,
    ) -> Result<Version> {
        VersionEndpoint::get_by_version_number(self, slug_or_id, version_number).await
    }

    async fn create(&self, request: CreateVersion) -> Result<Version> {
        VersionEndpoint::create(self, request).await
    }

    async fn delete(&self, version_id: &str) -> Result<()> {
        VersionEndpoint::delete(self, version_id).await
    }

    async fn schedule(
        &self,
        version_id: &str,
        time: DateTime<Utc>,
        requested_status: VersionRequestedStatus,
    ) -> Result<()> {
        VersionEndpoint::schedule(self, version_id, time, requested_status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use mockito::{Matcher, Server, ServerGuard};
    use modrinth_core::Error;

    fn test_client(server: &ServerGuard) -> ModrinthClient {
        let config = ClientConfig {
            base_url: server.url(),
            ..ClientConfig::default()
        };
        ModrinthClient::with_config(config).expect("Failed to create test client")
    }

    fn version_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "project_id": "AABBCCDD",
            "author_id": "EEFFGGHH",
            "name": format!("Version {id}"),
            "version_number": "1.0.0",
            "changelog": null,
            "dependencies": [],
            "game_versions": ["1.20.1"],
            "version_type": "release",
            "loaders": ["fabric"],
            "featured": false,
            "status": "listed",
            "requested_status": null,
            "date_published": "2023-09-01T12:00:00Z",
            "downloads": 0,
            "files": []
        })
    }

    fn not_found_body() -> &'static str {
        r#"{"error": "not_found", "description": "the requested version was not found"}"#
    }

    #[test]
    fn test_id_chunks_respect_limit() {
        let ids: Vec<String> = (0..250).map(|i| format!("v{i:03}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        for (length, expected_chunks) in [(0, 0), (1, 1), (100, 1), (101, 2), (250, 3)] {
            let chunks: Vec<_> = id_chunks(&refs[..length]).collect();
            assert_eq!(chunks.len(), expected_chunks, "length {length}");
            assert!(chunks.iter().all(|chunk| chunk.len() <= MAX_IDS_PER_REQUEST));

            // Concatenating the chunks reproduces the input in order
            let rejoined: Vec<&str> = chunks.into_iter().flatten().copied().collect();
            assert_eq!(rejoined, &refs[..length]);
        }
    }

    #[tokio::test]
    async fn test_get_existing_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/version/abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(version_json("abc123").to_string())
            .create_async()
            .await;

        let client = test_client(&server);
        let version = client.version().get("abc123").await.unwrap();
        assert_eq!(version.id, "abc123");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_missing_version_is_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/version/doesnotexist")
            .with_status(404)
            .with_body(not_found_body())
            .create_async()
            .await;

        let client = test_client(&server);
        let error = client.version().get("doesnotexist").await.unwrap_err();
        assert!(error.is_not_found());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_for_project_with_filters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/project/sodium/version")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("loaders".into(), r#"["fabric","quilt"]"#.into()),
                Matcher::UrlEncoded("featured".into(), "true".into()),
            ]))
            .with_status(200)
            .with_body(serde_json::json!([version_json("aaa"), version_json("bbb")]).to_string())
            .create_async()
            .await;

        let client = test_client(&server);
        let filter = ProjectVersionFilter {
            loaders: Some(vec!["fabric".to_string(), "quilt".to_string()]),
            game_versions: None,
            featured: Some(true),
        };
        let versions = client
            .version()
            .list_for_project("sodium", &filter)
            .await
            .unwrap();
        assert_eq!(versions.len(), 2);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_for_project_omits_unset_filters() {
        let mut server = Server::new_async().await;
        // Matches only a request with no query string at all
        let mock = server
            .mock("GET", "/project/sodium/version")
            .match_query(Matcher::Exact(String::new()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(&server);
        let versions = client
            .version()
            .list_for_project("sodium", &ProjectVersionFilter::default())
            .await
            .unwrap();
        assert!(versions.is_empty());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_multiple_batches_at_one_hundred() {
        let ids: Vec<String> = (0..150).map(|i| format!("v{i:03}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let first_batch: Vec<serde_json::Value> =
            refs[..100].iter().map(|id| version_json(id)).collect();
        let second_batch: Vec<serde_json::Value> =
            refs[100..].iter().map(|id| version_json(id)).collect();

        let mut server = Server::new_async().await;
        let first_mock = server
            .mock("GET", "/versions")
            .match_query(Matcher::UrlEncoded(
                "ids".into(),
                serde_json::to_string(&refs[..100]).unwrap(),
            ))
            .with_status(200)
            .with_body(serde_json::Value::Array(first_batch).to_string())
            .create_async()
            .await;
        let second_mock = server
            .mock("GET", "/versions")
            .match_query(Matcher::UrlEncoded(
                "ids".into(),
                serde_json::to_string(&refs[100..]).unwrap(),
            ))
            .with_status(200)
            .with_body(serde_json::Value::Array(second_batch).to_string())
            .create_async()
            .await;

        let client = test_client(&server);
        let versions = client.version().get_multiple(&refs).await.unwrap();

        // Exactly two requests, results concatenated in input order
        assert_eq!(versions.len(), 150);
        assert_eq!(versions[0].id, "v000");
        assert_eq!(versions[99].id, "v099");
        assert_eq!(versions[100].id, "v100");
        assert_eq!(versions[149].id, "v149");

        first_mock.assert_async().await;
        second_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_multiple_with_no_ids_issues_no_requests() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/versions")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server);
        let versions = client.version().get_multiple(&[]).await.unwrap();
        assert!(versions.is_empty());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_multiple_fails_whole_call_on_chunk_failure() {
        let ids: Vec<String> = (0..150).map(|i| format!("v{i:03}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let first_batch: Vec<serde_json::Value> =
            refs[..100].iter().map(|id| version_json(id)).collect();

        let mut server = Server::new_async().await;
        let first_mock = server
            .mock("GET", "/versions")
            .match_query(Matcher::UrlEncoded(
                "ids".into(),
                serde_json::to_string(&refs[..100]).unwrap(),
            ))
            .with_status(200)
            .with_body(serde_json::Value::Array(first_batch).to_string())
            .create_async()
            .await;
        let second_mock = server
            .mock("GET", "/versions")
            .match_query(Matcher::UrlEncoded(
                "ids".into(),
                serde_json::to_string(&refs[100..]).unwrap(),
            ))
            .with_status(500)
            .with_body("internal server error")
            .create_async()
            .await;

        let client = test_client(&server);
        let error = client.version().get_multiple(&refs).await.unwrap_err();
        assert_eq!(error.status().map(|s| s.as_u16()), Some(500));

        first_mock.assert_async().await;
        second_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_by_version_number() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/project/sodium/version/1.0.0")
            .with_status(200)
            .with_body(version_json("abc123").to_string())
            .create_async()
            .await;

        let client = test_client(&server);
        let version = client
            .version()
            .get_by_version_number("sodium", "1.0.0")
            .await
            .unwrap();
        assert_eq!(version.id, "abc123");

        mock.assert_async().await;
    }

    fn create_request(files: Vec<UploadableFile>, primary_file: &str) -> CreateVersion {
        CreateVersion {
            project_id: "AABBCCDD".to_string(),
            files,
            primary_file: primary_file.to_string(),
            name: "Version 1.0.0".to_string(),
            version_number: "1.0.0".to_string(),
            changelog: Some("Initial release".to_string()),
            dependencies: Vec::new(),
            game_versions: vec!["1.20.1".to_string()],
            version_type: ProjectVersionType::Release,
            loaders: vec!["fabric".to_string()],
            featured: false,
            status: VersionStatus::Listed,
            requested_status: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_empty_file_list_before_sending() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/version")
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server);
        let error = client
            .version()
            .create(create_request(Vec::new(), "mod-1.0.0.jar"))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Validation(_)));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_rejects_unmatched_primary_file_before_sending() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/version")
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server);
        let files = vec![UploadableFile::new("mod-1.0.0.jar", b"jar bytes".to_vec())];
        let error = client
            .version()
            .create(create_request(files, "other.jar"))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Validation(_)));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_uploads_multipart_and_returns_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/version")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .with_status(200)
            .with_body(version_json("newversion").to_string())
            .create_async()
            .await;

        let client = test_client(&server);
        let files = vec![UploadableFile::new("mod-1.0.0.jar", b"jar bytes".to_vec())];
        let version = client
            .version()
            .create(create_request(files, "mod-1.0.0.jar"))
            .await
            .unwrap();
        assert_eq!(version.id, "newversion");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/version/abc123")
            .with_status(204)
            .create_async()
            .await;

        let client = test_client(&server);
        client.version().delete("abc123").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_twice_surfaces_remote_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/version/abc123")
            .with_status(404)
            .with_body(not_found_body())
            .create_async()
            .await;

        let client = test_client(&server);
        let error = client.version().delete("abc123").await.unwrap_err();
        assert!(error.is_not_found());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_schedule_sends_wire_tokens() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/version/abc123/schedule")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "requested_status": "listed"
            })))
            .with_status(204)
            .create_async()
            .await;

        let client = test_client(&server);
        let time = Utc::now() + chrono::Duration::days(7);
        client
            .version()
            .schedule("abc123", time, VersionRequestedStatus::Listed)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_schedule_past_date_is_rejected_by_remote() {
        // Past dates go through unchanged; the remote refuses them
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/version/abc123/schedule")
            .with_status(400)
            .with_body(r#"{"error": "invalid_input", "description": "scheduled time is in the past"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let time = Utc::now() - chrono::Duration::days(1);
        let error = client
            .version()
            .schedule("abc123", time, VersionRequestedStatus::Listed)
            .await
            .unwrap_err();
        assert_eq!(error.status().map(|s| s.as_u16()), Some(400));

        mock.assert_async().await;
    }
}
