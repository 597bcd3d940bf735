//! Test helpers: build the router over temp-dir storage for integration tests.
//!
//! Run from workspace root: `cargo test -p tagsmith-api`.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use std::path::PathBuf;
use std::sync::Arc;
use tagsmith_api::setup::routes::setup_routes;
use tagsmith_api::state::AppState;
use tagsmith_core::Config;
use tagsmith_tags::{LoftyTagCodec, TagCodec};
use tempfile::TempDir;

/// Test application: server, configuration, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// On-disk location of an upload record.
    pub fn upload_path(&self, file_id: &str) -> PathBuf {
        self.config.upload_dir.join(format!("{}.mp3", file_id))
    }

    /// On-disk location of a tagged record.
    pub fn output_path(&self, tagged_file_id: &str) -> PathBuf {
        self.config.output_dir.join(format!("{}.mp3", tagged_file_id))
    }

    pub fn upload_dir_entries(&self) -> usize {
        std::fs::read_dir(&self.config.upload_dir)
            .expect("Failed to list upload directory")
            .count()
    }

    pub async fn upload(&self, data: Vec<u8>, filename: &str) -> TestResponse {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(data).file_name(filename).mime_type("audio/mpeg"),
        );
        self.server.post("/upload").multipart(form).await
    }

    /// Upload `data` as `track.mp3` and return the new file ID.
    pub async fn upload_ok(&self, data: Vec<u8>) -> String {
        let response = self.upload(data, "track.mp3").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["file_id"]
            .as_str()
            .expect("file_id missing from upload response")
            .to_string()
    }

    pub async fn save_tags(&self, file_id: &str, form: MultipartForm) -> TestResponse {
        self.server
            .post(&format!("/save-tags/{}", file_id))
            .multipart(form)
            .await
    }

    /// Save text fields and return the tagged file ID.
    pub async fn save_tags_ok(&self, file_id: &str, fields: &[(&str, &str)]) -> String {
        let response = self.save_tags(file_id, text_form(fields)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["tagged_file_id"]
            .as_str()
            .expect("tagged_file_id missing from save-tags response")
            .to_string()
    }

    pub async fn download(&self, tagged_file_id: &str) -> TestResponse {
        self.server
            .get(&format!("/download/{}", tagged_file_id))
            .await
    }

    pub async fn cleanup(&self, file_id: &str) -> TestResponse {
        self.server.delete(&format!("/cleanup/{}", file_id)).await
    }
}

/// Multipart form holding only text fields.
pub fn text_form(fields: &[(&str, &str)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(name.to_string(), value.to_string())
        })
}

/// Setup test app with default limits and temp-dir storage.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, adjusting the configuration before the router is built.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    build_test_app(configure, Arc::new(LoftyTagCodec::new())).await
}

/// Setup test app with a substitute tag codec.
pub async fn setup_test_app_with_codec(codec: Arc<dyn TagCodec>) -> TestApp {
    build_test_app(|_| {}, codec).await
}

async fn build_test_app(configure: impl FnOnce(&mut Config), codec: Arc<dyn TagCodec>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = Config::with_dirs(
        temp_dir.path().join("uploads"),
        temp_dir.path().join("output"),
    );
    configure(&mut config);

    let storage = tagsmith_storage::create_storage(&config)
        .await
        .expect("Failed to create storage");
    let state = Arc::new(AppState::with_codec(config.clone(), storage, codec));
    let router = setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        config,
        _temp_dir: temp_dir,
    }
}
