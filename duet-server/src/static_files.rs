use axum::{
    body::Body,
    http::{Response, StatusCode, Uri},
    response::{Html, IntoResponse, Json},
};

use crate::http::ErrorResponse;

const INDEX_HTML: &str = include_str!("../templates/index.html");

// Paths owned by the API; a miss under them is a 404, never the landing page
const API_PREFIXES: &[&str] = &[
    "health",
    "available-voices",
    "speech-providers",
    "generate-transcript",
    "generate-audio",
];

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn serve_static(uri: Uri) -> Response<Body> {
    let path = uri.path().trim_start_matches('/');

    // SECURITY: Prevent path traversal attacks
    if path.contains("..") || path.contains("//") || path.contains('\\') {
        return error_response(StatusCode::BAD_REQUEST, "Invalid path", "BAD_REQUEST");
    }

    if API_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return error_response(
            StatusCode::NOT_FOUND,
            &format!("No route for /{}", path),
            "NOT_FOUND",
        );
    }

    Html(INDEX_HTML).into_response()
}

fn error_response(status: StatusCode, message: &str, code: &str) -> Response<Body> {
    let body = Json(ErrorResponse {
        error: message.to_string(),
        code: code.to_string(),
    });
    (status, body).into_response()
}
