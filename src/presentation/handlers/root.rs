use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: "Local Ollama Document Summarizer API",
        endpoints: BTreeMap::from([
            ("health", "/health"),
            ("models", "/models"),
            ("summarize", "/summarize"),
            ("summarize_stream", "/summarize/stream"),
        ]),
    })
}
