use std::fmt;

use serde::Serialize;

/// Steps of a summarize request, in order. Errors are tagged with the step
/// that raised them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStage {
    Received,
    TypeValidated,
    Extracted,
    PromptBuilt,
    Inferred,
    Responded,
}

impl RequestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStage::Received => "received",
            RequestStage::TypeValidated => "type_validated",
            RequestStage::Extracted => "extracted",
            RequestStage::PromptBuilt => "prompt_built",
            RequestStage::Inferred => "inferred",
            RequestStage::Responded => "responded",
        }
    }
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
