// Router surface tests: landing page, fallback, request extraction

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use duet_gen::{ArtifactStorage, GenerationCall, GenerationError, GenerationLibrary, Orchestrator};
use duet_server::http::{create_router, ApiState};
use duet_spk::catalog::{CatalogOrigin, VoiceCatalog};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

struct UnusedGenerator;

#[async_trait]
impl GenerationLibrary for UnusedGenerator {
    async fn generate(&self, _call: GenerationCall) -> Result<PathBuf, GenerationError> {
        Err(GenerationError::Library("not expected in these tests".to_string()))
    }

    fn name(&self) -> &str {
        "unused"
    }
}

fn app(root: &std::path::Path) -> Router {
    let storage = ArtifactStorage::new(root);
    storage.ensure().unwrap();
    let orchestrator = Orchestrator::new(
        Arc::new(VoiceCatalog::builtin()),
        Arc::new(UnusedGenerator),
        storage,
    );
    create_router(ApiState {
        orchestrator: Arc::new(orchestrator),
        catalog_origin: CatalogOrigin::BuiltinFallback {
            reason: "test".to_string(),
        },
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_landing_page() {
    let root = tempfile::tempdir().unwrap();
    let (status, body) = get(app(root.path()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("<title>Duet</title>"));
}

#[tokio::test]
async fn test_unknown_page_falls_back_to_landing() {
    let root = tempfile::tempdir().unwrap();
    let (status, body) = get(app(root.path()), "/about").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("<title>Duet</title>"));
}

#[tokio::test]
async fn test_unknown_api_path_is_404() {
    let root = tempfile::tempdir().unwrap();
    let (status, body) = get(app(root.path()), "/generate-video").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health_reports_catalog_origin() {
    let root = tempfile::tempdir().unwrap();
    let (status, body) = get(app(root.path()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["generator"], "unused");
    assert_eq!(json["catalog_origin"]["kind"], "builtin_fallback");
    assert_eq!(json["catalog_origin"]["reason"], "test");
}

#[tokio::test]
async fn test_speech_providers() {
    let root = tempfile::tempdir().unwrap();
    let (status, body) = get(app(root.path()), "/speech-providers").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["providers"], serde_json::json!(["geminimulti", "gemini", "google"]));
    assert_eq!(json["default_tts_model"], "geminimulti");
    assert_eq!(
        json["defaults"]["providers"]["gemini"]["default_voices"]["answer"]["name"],
        "en-US-Journey-O"
    );
    assert_eq!(
        json["defaults"]["providers"]["geminimulti"]["model"],
        "en-US-Studio-MultiSpeaker"
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    let response = app(root.path())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-transcript")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"text\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    let response = app(root.path())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-audio")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
