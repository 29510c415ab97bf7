#![allow(dead_code)]

use std::path::Path;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use driver_log_api::database::Database;
use driver_log_api::{app, AppConfig, AppState};

pub const PASSWORD: &str = "test-manager-password";
const BOUNDARY: &str = "driver-log-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub uploads: TempDir,
}

fn test_config(database_url: &str, upload_dir: &Path) -> Result<AppConfig> {
    let upload_dir = upload_dir.to_string_lossy().into_owned();
    let database_url = database_url.to_string();
    let config = AppConfig::from_lookup(move |key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "MANAGER_PASSWORD" => Some(PASSWORD.to_string()),
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        "UPLOAD_DIR" => Some(upload_dir.clone()),
        "API_ENABLE_REQUEST_LOGGING" => Some("false".to_string()),
        _ => None,
    })?;
    Ok(config)
}

fn build(config: AppConfig, db: Database, uploads: TempDir) -> Result<TestApp> {
    let state = AppState::new(config, db)?;
    Ok(TestApp {
        router: app(state.clone()),
        state,
        uploads,
    })
}

/// App whose pool never connects; for requests that must not reach the store
pub fn offline_app() -> Result<TestApp> {
    let uploads = tempfile::tempdir()?;
    let config = test_config("postgres://postgres@127.0.0.1:1/driver_log_offline", &uploads.path().join("uploads"))?;
    let db = Database::connect_lazy(&config.database)?;
    build(config, db, uploads)
}

/// App backed by the Postgres database in TEST_DATABASE_URL.
/// Tests using it are `#[ignore]`d; run them with `cargo test -- --ignored`.
pub async fn database_app() -> Result<TestApp> {
    let url = std::env::var("TEST_DATABASE_URL")
        .context("TEST_DATABASE_URL must point at a Postgres database for this test")?;

    let uploads = tempfile::tempdir()?;
    let config = test_config(&url, &uploads.path().join("uploads"))?;
    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to TEST_DATABASE_URL")?;
    db.ensure_schema().await?;
    build(config, db, uploads)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }
}

impl TestApp {
    pub fn token(&self) -> String {
        self.state.gate.login(PASSWORD).expect("manager token")
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?.to_vec();
        Ok(TestResponse { status, bytes })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.send(Request::get(uri).body(Body::empty())?).await
    }

    pub async fn json(&self, method: Method, uri: &str, body: &Value, token: Option<&str>) -> Result<TestResponse> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body.to_string()))?).await
    }

    pub async fn authed_json(&self, method: Method, uri: &str, body: &Value) -> Result<TestResponse> {
        let token = self.token();
        self.json(method, uri, body, Some(&token)).await
    }

    pub async fn authed_multipart(
        &self,
        method: Method,
        uri: &str,
        fields: &[(&str, &str)],
        photo: Option<(&str, &[u8])>,
    ) -> Result<TestResponse> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token()))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields, photo)))?;
        self.send(request).await
    }

    pub async fn authed_delete(&self, uri: &str) -> Result<TestResponse> {
        let request = Request::delete(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token()))
            .body(Body::empty())?;
        self.send(request).await
    }
}

fn multipart_body(fields: &[(&str, &str)], photo: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"profile_photo\"; \
                 filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Unique suffix so concurrent tests sharing one database do not collide
pub fn unique(label: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{label}-{nanos}")
}
