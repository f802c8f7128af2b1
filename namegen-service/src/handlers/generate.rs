use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Json, Response},
};
use service_core::{cors, error::AppError};
use validator::Validate;

use crate::models::{ApiResponse, GenerationRequest, DESCRIPTION_REQUIRED};
use crate::services::{metrics, NameGenerator};
use crate::startup::AppState;

/// Largest request body either deployment will buffer.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Deployment-independent handler: one buffered request in, one envelope out.
///
/// Never fails; every error is rendered as a JSON envelope.
pub async fn handle(request: Request<Bytes>, generator: &NameGenerator) -> Response {
    let response = match request.method() {
        &Method::OPTIONS => cors::preflight(),
        &Method::POST => match generate_name(request.body(), generator).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        },
        other => {
            tracing::warn!(method = %other, "Rejected method");
            AppError::MethodNotAllowed(other.clone()).into_response()
        }
    };

    metrics::record_request(response.status());
    response
}

async fn generate_name(body: &[u8], generator: &NameGenerator) -> Result<Response, AppError> {
    let payload: GenerationRequest = serde_json::from_slice(body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse request body");
        anyhow::Error::new(e).context("Invalid request body")
    })?;

    tracing::info!(
        description_len = payload.description().len(),
        tech_stack = payload.tech_stack().unwrap_or("-"),
        must_include = payload.must_include().unwrap_or("-"),
        "Received generation request"
    );

    if payload.validate().is_err() {
        return Err(AppError::BadRequest(DESCRIPTION_REQUIRED.to_string()));
    }

    let result = generator.generate(&payload).await?;

    tracing::info!(name = %result.name, "Generated repository name");

    let mut response = Json(ApiResponse::ok(result)).into_response();
    cors::allow_any_origin(response.headers_mut());
    Ok(response)
}

/// Buffers at most [`MAX_BODY_BYTES`] of the body, then runs [`handle`].
///
/// Both deployments go through here so an oversized body fails the same way
/// on each.
async fn buffer_and_handle(
    request: axum::extract::Request,
    generator: &NameGenerator,
) -> Response {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read request body");
            let response =
                AppError::InternalError(anyhow::anyhow!("Failed to read request body: {}", e))
                    .into_response();
            metrics::record_request(response.status());
            return response;
        }
    };

    handle(Request::from_parts(parts, body), generator).await
}

/// Pages "function" entry point, mounted at the generate-name route.
pub async fn pages_function(
    State(state): State<AppState>,
    request: axum::extract::Request,
) -> Response {
    buffer_and_handle(request, &state.generator).await
}

/// Worker entry point: receives the raw streaming request for any path.
pub async fn worker_fetch(
    State(state): State<AppState>,
    request: axum::extract::Request,
) -> Response {
    buffer_and_handle(request, &state.generator).await
}
