use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::InferenceError;
use crate::application::services::SummarizeError;
use crate::domain::RequestStage;

/// Error returned by every handler: a status code plus the JSON body
/// `{"error": {"kind", "message", "stage"}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
    pub stage: Option<RequestStage>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
    pub stage: Option<RequestStage>,
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_request",
            message: message.into(),
            stage: Some(RequestStage::Received),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            kind: "payload_too_large",
            message: message.into(),
            stage: Some(RequestStage::Received),
        }
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                kind: self.kind.to_string(),
                message: self.message.clone(),
                stage: self.stage,
            },
        }
    }
}

impl From<SummarizeError> for ApiError {
    fn from(error: SummarizeError) -> Self {
        let status = match &error {
            SummarizeError::UnsupportedFormat { .. } | SummarizeError::Extraction(_) => {
                StatusCode::BAD_REQUEST
            }
            SummarizeError::Scratch(_) | SummarizeError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            kind: error.kind(),
            message: error.to_string(),
            stage: Some(error.stage()),
        }
    }
}

impl From<InferenceError> for ApiError {
    fn from(error: InferenceError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: error.kind(),
            message: error.to_string(),
            stage: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = self.kind, stage = ?self.stage, message = %self.message, "Request failed");
        } else {
            tracing::warn!(kind = self.kind, stage = ?self.stage, message = %self.message, "Request rejected");
        }

        (self.status, Json(self.body())).into_response()
    }
}
