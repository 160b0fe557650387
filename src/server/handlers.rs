//! HTTP request handlers for the probe API.
//!
//! # Endpoints
//!
//! - `GET /probe/{*key}` - Probe an object from the configured source
//! - `POST /probe` - Probe an uploaded body
//! - `GET /stats` - Descriptor cache statistics
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{IoError, ProbeError};
use crate::service::{CacheStats, ProbeResponse, ProbeService};
use crate::source::ObjectSource;

/// Response header reporting whether the descriptor came from the cache.
pub const CACHE_HIT_HEADER: &str = "x-probe-cache-hit";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the probe service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: ObjectSource> {
    /// The probe service for object and upload requests
    pub probe_service: Arc<ProbeService<S>>,

    /// Cache-Control max-age in seconds for object probes
    pub cache_max_age: u32,
}

impl<S: ObjectSource> AppState<S> {
    /// Create a new application state with the given probe service.
    pub fn new(probe_service: ProbeService<S>) -> Self {
        Self::with_cache_max_age(probe_service, 3600)
    }

    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(probe_service: ProbeService<S>, cache_max_age: u32) -> Self {
        Self {
            probe_service: Arc::new(probe_service),
            cache_max_age,
        }
    }
}

impl<S: ObjectSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            probe_service: Arc::clone(&self.probe_service),
            cache_max_age: self.cache_max_age,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "unrecognized_format")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Status, error type and message for a probe failure.
fn classify(err: &ProbeError) -> (StatusCode, &'static str, String) {
    match err {
        ProbeError::UnrecognizedFormat => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unrecognized_format",
            err.to_string(),
        ),
        ProbeError::InsufficientData { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "insufficient_data",
            err.to_string(),
        ),
        ProbeError::Io(IoError::NotFound(what)) => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Object not found: {}", what),
        ),
        ProbeError::Io(io_err @ IoError::Connection(_)) => (
            StatusCode::BAD_GATEWAY,
            "upstream_error",
            format!("Storage unavailable: {}", io_err),
        ),
        ProbeError::Io(io_err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "io_error",
            format!("I/O error: {}", io_err),
        ),
    }
}

/// Convert ProbeError to HTTP response.
///
/// This implementation logs errors based on their severity:
/// - 404s at DEBUG level (common and expected)
/// - other 4xx at WARN level (client errors)
/// - 5xx at ERROR level (server errors)
impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = classify(&self);

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle object probe requests.
///
/// # Endpoint
///
/// `GET /probe/{*key}`
///
/// # Response
///
/// - `200 OK`: JSON descriptor `{format, media_type, width, height}`
/// - `404 Not Found`: No such object
/// - `415 Unsupported Media Type`: Not a recognized image
/// - `422 Unprocessable Entity`: Object too short to identify
/// - `502 Bad Gateway`: Storage unreachable
///
/// # Headers
///
/// - `Cache-Control: public, max-age={cache_max_age}`
/// - `X-Probe-Cache-Hit: true|false`
pub async fn probe_object_handler<S: ObjectSource>(
    State(state): State<AppState<S>>,
    Path(key): Path<String>,
) -> Result<Response, ProbeError> {
    let response = state.probe_service.probe_object(&key).await?;

    Ok(descriptor_response(
        response,
        format!("public, max-age={}", state.cache_max_age),
    ))
}

/// Handle upload probe requests.
///
/// # Endpoint
///
/// `POST /probe` with the image (or its first bytes) as the request body.
///
/// Only the service's header window is inspected; the rest of the body is
/// ignored. Responses are never cacheable.
pub async fn probe_upload_handler<S: ObjectSource>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<Response, ProbeError> {
    debug!(len = body.len(), "probing upload");
    let response = state.probe_service.probe_bytes(&body)?;

    Ok(descriptor_response(response, "no-store".to_string()))
}

fn descriptor_response(response: ProbeResponse, cache_control: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, cache_control),
            (
                HeaderName::from_static(CACHE_HIT_HEADER),
                response.cache_hit.to_string(),
            ),
        ],
        Json(response.descriptor),
    )
        .into_response()
}

/// Handle cache statistics requests.
///
/// # Endpoint
///
/// `GET /stats`
pub async fn stats_handler<S: ObjectSource>(
    State(state): State<AppState<S>>,
) -> Json<CacheStats> {
    Json(state.probe_service.cache_stats().await)
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
