use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Failures talking to the hosted generative model
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM provider is not configured")]
    Disabled,
    #[error("LLM request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Rate limited by LLM provider")]
    RateLimited,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures relaying a message to the external chat service
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Chat API error: {0}")]
    ApiError(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Narrative schema mismatch: {}", .0.join("; "))]
    Schema(Vec<String>),
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Schema(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing envelope. Upstream detail stays in the server log.
    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::Validation(msg) => ErrorBody {
                error: "Validation Error",
                message: msg.clone(),
                kind: None,
            },
            AppError::Configuration(msg) => ErrorBody {
                error: "Server Configuration Error",
                message: msg.clone(),
                kind: None,
            },
            AppError::Llm(LlmError::Timeout) => ErrorBody {
                error: "Server Error",
                message: "The narrative provider did not respond in time".to_string(),
                kind: Some("timeout"),
            },
            AppError::Llm(LlmError::Disabled) => ErrorBody {
                error: "Server Configuration Error",
                message: "API key not configured".to_string(),
                kind: None,
            },
            AppError::Llm(_) => ErrorBody {
                error: "Server Error",
                message: "The narrative provider request failed".to_string(),
                kind: Some("upstream"),
            },
            AppError::Chat(ChatError::Timeout) => ErrorBody {
                error: "Server Error",
                message: "The chat service did not respond in time".to_string(),
                kind: Some("timeout"),
            },
            AppError::Chat(_) => ErrorBody {
                error: "Server Error",
                message: "The chat service request failed".to_string(),
                kind: Some("upstream"),
            },
            AppError::Parse(msg) => ErrorBody {
                error: "Server Error",
                message: msg.clone(),
                kind: Some("parse"),
            },
            AppError::Schema(problems) => ErrorBody {
                error: "Schema Validation Error",
                message: format!(
                    "Narrative does not match the expected shape: {}",
                    problems.join("; ")
                ),
                kind: Some("schema"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.body())).into_response()
    }
}
