//! HTTP handlers for payload generation and lookup.

use crate::application::service::{GenerateRequest, KhqrService};
use crate::error::KhqrError;
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

pub type AppState = Arc<KhqrService>;

/// Query string of `GET /get-latest-qr`.
#[derive(Debug, Default, Deserialize)]
pub struct LatestQuery {
    pub id: Option<String>,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResp {
    pub error: String,
}

/// GET /health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResp {
    pub status: String,
    pub version: String,
}

impl IntoResponse for KhqrError {
    fn into_response(self) -> Response {
        let status = match &self {
            KhqrError::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorResp { error: self.to_string() })).into_response()
    }
}

/// POST /generate-qr
///
/// An empty body is a request without an amount. Malformed JSON and fields of
/// the wrong type are rejected as invalid requests.
pub async fn generate_handler(State(service): State<AppState>, body: Bytes) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };
    match service.generate(request).await {
        Ok(generated) => (StatusCode::OK, Json(generated)).into_response(),
        Err(e) => e.into_response(),
    }
}

fn parse_request(body: &[u8]) -> Result<GenerateRequest, KhqrError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| KhqrError::InvalidRequest(e.to_string()))
}

/// GET /get-latest-qr?id=ID3
///
/// Returns the raw payload as plain text.
pub async fn latest_handler(
    State(service): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Response {
    match service.latest(query.id.as_deref()).await {
        Ok(payload) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            payload.into_string(),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /health
pub async fn health_handler() -> Json<HealthResp> {
    Json(HealthResp {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
