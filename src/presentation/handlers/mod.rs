mod error;
mod health;
mod models;
mod root;
mod summarize;
mod upload_form;

pub use error::{ApiError, ErrorBody, ErrorResponse};
pub use health::{HealthResponse, health_handler};
pub use models::{ModelsResponse, models_handler};
pub use root::root_handler;
pub use summarize::{summarize_handler, summarize_stream_handler};
pub use upload_form::SummarizeQuery;
