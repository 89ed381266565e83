use std::convert::Infallible;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::stream::StreamExt;
use serde::Serialize;

use crate::application::ports::{InferenceClient, InferenceError, TextExtractor};
use crate::application::services::SummaryStream;
use crate::domain::SummaryResponse;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::upload_form::{SummarizeQuery, read_summarize_request};

#[derive(Serialize)]
struct TokenEvent<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct DoneEvent {
    summary_length: usize,
}

#[tracing::instrument(skip_all)]
pub async fn summarize_handler<E, C>(
    State(state): State<AppState<E, C>>,
    Query(query): Query<SummarizeQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResponse>, ApiError>
where
    E: TextExtractor + 'static,
    C: InferenceClient + 'static,
{
    let request = read_summarize_request(multipart, query).await?;
    let response = state.summarization_service.summarize(request).await?;

    Ok(Json(response))
}

/// Server-sent events: one `metadata` event, a `token` event per fragment,
/// then `done`, or `error` if the backend fails mid-stream.
#[tracing::instrument(skip_all)]
pub async fn summarize_stream_handler<E, C>(
    State(state): State<AppState<E, C>>,
    Query(query): Query<SummarizeQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
    E: TextExtractor + 'static,
    C: InferenceClient + 'static,
{
    let request = read_summarize_request(multipart, query).await?;
    let SummaryStream {
        metadata,
        mut tokens,
    } = state.summarization_service.summarize_stream(request).await?;

    let sse_stream = async_stream::stream! {
        yield Ok::<_, Infallible>(json_event("metadata", &metadata));

        let mut summary = String::new();
        while let Some(token) = tokens.next().await {
            match token {
                Ok(token) => {
                    summary.push_str(&token);
                    yield Ok(json_event("token", &TokenEvent { token: &token }));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Summary stream failed");
                    yield Ok(json_event("error", &ApiError::from(e).body()));
                    return;
                }
            }
        }

        let summary_length = summary.trim().chars().count();
        if summary_length == 0 {
            let empty = InferenceError::Backend("empty response from Ollama".to_string());
            yield Ok(json_event("error", &ApiError::from(empty).body()));
            return;
        }

        tracing::info!(model = %metadata.model, summary_length, "Streamed summary complete");
        yield Ok(json_event("done", &DoneEvent { summary_length }));
    };

    Ok(Sse::new(sse_stream)
        .keep_alive(KeepAlive::default())
        .into_response())
}

fn json_event<T: Serialize>(name: &'static str, payload: &T) -> Event {
    Event::default()
        .event(name)
        .json_data(payload)
        .unwrap_or_else(|e| Event::default().event("error").data(e.to_string()))
}
