#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

use narrative_backend::config::{AppConfig, LlmConfig};
use narrative_backend::errors::{ChatError, LlmError};
use narrative_backend::models::{ChatRequest, ChatResponse};
use narrative_backend::services::chat_service::{ChatProvider, ChatService};
use narrative_backend::services::llm_service::{LlmProvider, LlmService};
use narrative_backend::{create_app, AppState};

/// What the scripted model answers with
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Network(String),
}

/// Model stand-in that records every prompt it receives
pub struct ScriptedModel {
    reply: Reply,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Text(text.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Network(message.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn hanging(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Text(text.to_string()),
            delay: Some(delay),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedModel {
    async fn generate_completion(&self, prompt: String) -> Result<String, LlmError> {
        self.prompts.lock().push(prompt);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Network(message) => Err(LlmError::NetworkError(message.clone())),
        }
    }
}

/// Chat backend stand-in
pub struct ScriptedChat {
    pub fail: bool,
    pub seen: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChat {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatProvider for ScriptedChat {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        self.seen.lock().push(request.clone());
        if self.fail {
            return Err(ChatError::ApiError("HTTP error! Status: 503".to_string()));
        }
        Ok(ChatResponse {
            response: format!("({}) answer to: {}", request.language, request.query),
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        llm: LlmConfig {
            api_key: Some("test-key".to_string()),
            request_timeout: Duration::from_secs(5),
            ..LlmConfig::default()
        },
        ..AppConfig::default()
    }
}

pub fn state_with(
    config: AppConfig,
    model: Option<Arc<ScriptedModel>>,
    chat: Arc<ScriptedChat>,
) -> AppState {
    let llm_service = match model {
        Some(model) => LlmService::with_provider(config.llm.clone(), model),
        None => LlmService::disabled(config.llm.clone()),
    };
    let chat_service = ChatService::with_provider(config.chat.clone(), chat);
    AppState {
        config: Arc::new(config),
        llm_service: Arc::new(llm_service),
        chat_service: Arc::new(chat_service),
    }
}

pub fn app_with_model(model: Arc<ScriptedModel>) -> Router {
    create_app(state_with(test_config(), Some(model), ScriptedChat::ok()))
}

pub fn app_without_key() -> Router {
    let mut config = test_config();
    config.llm.api_key = None;
    create_app(state_with(config, None, ScriptedChat::ok()))
}

/// Send a POST and return the status with the raw response body
pub async fn post_text(
    app: Router,
    path: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method("POST").uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn post_raw(
    app: Router,
    path: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let (status, text) = post_text(app, path, content_type, body).await;
    let value = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, value)
}

pub async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, path, Some("application/json"), &body.to_string()).await
}

pub fn sample_narrative() -> Value {
    serde_json::json!({
        "company_overview": {
            "name": "Northwind Traders",
            "storytelling_approach": "Narrative exploration of financial performance"
        },
        "financial_story_sections": {
            "income_statement_narrative": {
                "title": "Selling More, Keeping More",
                "key_insights": [
                    "Revenue up 15.2%",
                    "Gross margin at 42.5%",
                    "Operating margin at 18.3%"
                ],
                "story": "Northwind sold more tea and coffee than in any prior year."
            },
            "balance_sheet_narrative": {
                "title": "Plenty in the Pantry",
                "key_insights": ["Current ratio of 2.1", "Inventory levels rising"],
                "story": "There is more than enough on hand to pay the bills."
            },
            "cash_flow_narrative": {
                "title": "Cash In, Cash Out",
                "key_insights": ["Healthy operating cash flow"],
                "story": "Daily operations brought in more cash than they used."
            }
        },
        "comprehensive_narrative": {
            "title": "A Growing Business Finding Its Footing",
            "story": "The statements describe a company growing steadily while watching its stock."
        },
        "key_performance_indicators": {
            "revenue_growth": "15.2%",
            "net_income_growth": "12.8%",
            "asset_growth": "7.4%"
        }
    })
}
