//! HTTP handler for the conversation webhook.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::ErrorResponse;
use crate::adapters::actions::{ActionsApp, ActionsError};
use crate::domain::conversation::AppRequest;

/// Shared state of the fulfillment route.
#[derive(Clone)]
pub struct FulfillmentAppState {
    pub app: Arc<ActionsApp>,
}

impl FulfillmentAppState {
    pub fn new(app: Arc<ActionsApp>) -> Self {
        Self { app }
    }
}

/// POST /{id}/fulfillment - Run one conversation turn.
///
/// # Errors
/// - 400 Bad Request: body is not a conversation webhook request
/// - 404 Not Found: no handler for the request's intent
/// - 500 Internal Server Error: the turn produced no response
pub async fn fulfill(
    State(state): State<FulfillmentAppState>,
    body: Result<Json<AppRequest>, JsonRejection>,
) -> Result<impl IntoResponse, FulfillmentApiError> {
    let Json(request) = body.map_err(|e| FulfillmentApiError::BadRequest(e.body_text()))?;

    let response = state.app.handle(request).await?;
    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub enum FulfillmentApiError {
    BadRequest(String),
    NotFound(String, String),
    Internal(String),
}

impl From<ActionsError> for FulfillmentApiError {
    fn from(err: ActionsError) -> Self {
        match err {
            ActionsError::NoHandler(intent) => {
                FulfillmentApiError::NotFound("Intent handler".to_string(), intent)
            }
            other => FulfillmentApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for FulfillmentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            FulfillmentApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            FulfillmentApiError::NotFound(resource, id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(&resource, &id))
            }
            FulfillmentApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
