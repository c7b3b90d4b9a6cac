// HTTP server with the podcast generation API

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequest, Path, Request, State},
    http::{header, Response, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Form, Router,
};
use duet_core::{Error, ErrorClass};
use duet_gen::{AudioRequest, Orchestrator, TranscriptRequest};
use duet_spk::catalog::CatalogOrigin;
use duet_spk::provider::{SpeechConfig, SpeechProvider, DEFAULT_TTS_MODEL};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::static_files::{index_handler, serve_static};

// API state
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
    pub catalog_origin: CatalogOrigin,
}

// Response types
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub generator: String,
    pub catalog_origin: CatalogOrigin,
}

#[derive(Debug, Serialize)]
pub struct SpeechProvidersResponse {
    pub providers: Vec<SpeechProvider>,
    pub default_tts_model: String,
    pub defaults: SpeechConfig,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub status: String,
    pub transcript_file: String,
    pub transcript_content: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err.class() {
            ErrorClass::Client => StatusCode::BAD_REQUEST,
            ErrorClass::Server => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response<Body> {
        let body = Json(ErrorResponse {
            error: self.message,
            code: self.code.to_string(),
        });
        (self.status, body).into_response()
    }
}

/// Request body accepted as JSON or as an urlencoded form
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Create HTTP router with all API routes
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/available-voices", get(available_voices_handler))
        .route("/available-voices/:language", get(language_voices_handler))
        .route("/speech-providers", get(speech_providers_handler))
        .route("/generate-transcript", post(generate_transcript_handler))
        .route("/generate-audio", post(generate_audio_handler))
        .fallback(serve_static)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generator: state.orchestrator.generator_name().to_string(),
        catalog_origin: state.catalog_origin.clone(),
    })
}

async fn available_voices_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.orchestrator.catalog().clone())
}

async fn language_voices_handler(
    State(state): State<ApiState>,
    Path(language): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.orchestrator.catalog().tiers(&language) {
        Some(tiers) => Ok(Json(tiers.clone())),
        None => {
            warn!(%language, "Voices requested for unknown language");
            Err(ApiError::not_found(format!("Language '{}' not found", language)))
        }
    }
}

async fn speech_providers_handler() -> impl IntoResponse {
    Json(SpeechProvidersResponse {
        providers: SpeechProvider::ALL.to_vec(),
        default_tts_model: DEFAULT_TTS_MODEL.to_string(),
        defaults: SpeechConfig::default(),
    })
}

async fn generate_transcript_handler(
    State(state): State<ApiState>,
    JsonOrForm(request): JsonOrForm<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let artifact = state.orchestrator.generate_transcript(request).await?;

    Ok(Json(TranscriptResponse {
        status: "success".to_string(),
        transcript_file: artifact.path.display().to_string(),
        transcript_content: artifact.content,
    }))
}

async fn generate_audio_handler(
    State(state): State<ApiState>,
    JsonOrForm(request): JsonOrForm<AudioRequest>,
) -> Result<Response<Body>, ApiError> {
    let artifact = state.orchestrator.generate_audio(request).await?;

    let file = tokio::fs::File::open(&artifact.path).await.map_err(|e| {
        error!(path = %artifact.path.display(), error = %e, "Failed to open generated audio");
        ApiError::from(Error::Io(e))
    })?;
    let length = file.metadata().await.map(|meta| meta.len()).ok();

    let file_name = artifact.file_name();
    info!(file = %file_name, bytes = ?length, "Streaming generated audio");

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
        );
    if let Some(length) = length {
        response = response.header(header::CONTENT_LENGTH, length);
    }

    response
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| {
            error!(error = %e, "Failed to build audio response");
            ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "IO_ERROR",
                message: e.to_string(),
            }
        })
}
