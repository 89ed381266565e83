use axum::extract::Multipart;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::application::services::SummarizeRequest;

use super::error::ApiError;

/// `model` and `max_length` may also arrive on the query string; form
/// fields take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeQuery {
    pub model: Option<String>,
    pub max_length: Option<String>,
}

pub async fn read_summarize_request(
    multipart: Result<Multipart, MultipartRejection>,
    query: SummarizeQuery,
) -> Result<SummarizeRequest, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::invalid_request(e.body_text()))?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut model = query.model;
    let mut max_length = query.max_length;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                tracing::debug!(filename = %filename, bytes = data.len(), "File data received");
                file = Some((filename, data.to_vec()));
            }
            Some("model") => model = Some(field.text().await.map_err(multipart_error)?),
            Some("max_length") => max_length = Some(field.text().await.map_err(multipart_error)?),
            other => tracing::debug!(field = ?other, "Ignoring unknown form field"),
        }
    }

    let (filename, data) = file.ok_or_else(|| ApiError::invalid_request("No file uploaded"))?;

    Ok(SummarizeRequest {
        filename,
        data,
        model: model.filter(|m| !m.trim().is_empty()),
        max_length: parse_max_length(max_length.as_deref())?,
    })
}

fn parse_max_length(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
            ApiError::invalid_request(format!("max_length must be an integer, got '{value}'"))
        }),
    }
}

fn multipart_error(error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(error.body_text())
    } else {
        ApiError::invalid_request(error.body_text())
    }
}
