use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::ChatConfig;
use crate::errors::{AppError, ChatError};
use crate::models::{ChatRequest, ChatResponse};

/// Trait for the external chat backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}

/// Chat backend reached over HTTP
pub struct HttpChatProvider {
    endpoint: String,
    client: Client,
}

impl HttpChatProvider {
    pub fn new(endpoint: String) -> Result<Self, ChatError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ChatError::NetworkError(e.to_string()))?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl ChatProvider for HttpChatProvider {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout
                } else {
                    ChatError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::ApiError(format!("HTTP error! Status: {}", status)));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))
    }
}

/// Relays chat messages to the configured chat backend
pub struct ChatService {
    config: ChatConfig,
    provider: Option<Arc<dyn ChatProvider>>,
}

impl ChatService {
    pub fn new(config: ChatConfig) -> Self {
        let provider = match HttpChatProvider::new(config.endpoint.clone()) {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn ChatProvider>),
            Err(e) => {
                warn!("Failed to build chat client: {}. Chat relay disabled.", e);
                None
            }
        };
        Self { config, provider }
    }

    pub fn with_provider(config: ChatConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            config,
            provider: Some(provider),
        }
    }

    pub async fn relay(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        if request.query.trim().is_empty() {
            return Err(AppError::Validation("Query is required".to_string()));
        }

        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Chat service not configured".to_string()))?;

        info!(
            "Relaying chat message (language: {}, {} chars)",
            request.language,
            request.query.len()
        );

        match tokio::time::timeout(self.config.request_timeout, provider.send(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                warn!("Chat relay failed: {}", e);
                Err(AppError::Chat(e))
            }
            Err(_) => {
                warn!("Chat relay exceeded deadline of {:?}", self.config.request_timeout);
                Err(AppError::Chat(ChatError::Timeout))
            }
        }
    }
}
