use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::LlmConfig;
use crate::errors::LlmError;

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate_completion(&self, prompt: String) -> Result<String, LlmError>;
}

/// Gemini `generateContent` request/response structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Result<String, LlmError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(format!(
                "Candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

/// Google Generative Language provider
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key,
            model,
            base_url,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate_completion(&self, prompt: String) -> Result<String, LlmError> {
        info!("Generating LLM completion (model: {}, prompt: {} chars)", self.model, prompt.len());

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ApiError(format!("HTTP {}: {}", status, error_text)));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &body.usage_metadata {
            info!(
                "LLM completion generated. Tokens: {} prompt + {} completion = {} total",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        body.into_text()
    }
}

/// LLM service: provider selection plus a per-call deadline
///
/// There is no retry, cache or rate limit; every call reaches the provider.
pub struct LlmService {
    config: LlmConfig,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl LlmService {
    pub fn new(config: LlmConfig) -> Self {
        let provider = match config.api_key() {
            Some(api_key) => {
                match GeminiProvider::new(
                    api_key.to_string(),
                    config.model.clone(),
                    config.base_url.clone(),
                ) {
                    Ok(provider) => {
                        info!("Initializing LLM service with model: {}", config.model);
                        Some(Arc::new(provider) as Arc<dyn LlmProvider>)
                    }
                    Err(e) => {
                        warn!("Failed to build Gemini client: {}. LLM features disabled.", e);
                        None
                    }
                }
            }
            None => {
                warn!("GEMINI_API_KEY not configured. Narrative generation will be refused.");
                None
            }
        };

        Self { config, provider }
    }

    /// Service backed by an explicit provider
    pub fn with_provider(config: LlmConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            config,
            provider: Some(provider),
        }
    }

    /// Service with no provider; every call fails with `Disabled`
    pub fn disabled(config: LlmConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Single provider call bounded by the configured deadline
    pub async fn generate_completion(&self, prompt: String) -> Result<String, LlmError> {
        let provider = self.provider.as_ref().ok_or(LlmError::Disabled)?;

        let call = provider.generate_completion(prompt);
        match tokio::time::timeout(self.config.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("LLM call exceeded deadline of {:?}", self.config.request_timeout);
                Err(LlmError::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct EchoProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn generate_completion(&self, prompt: String) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(prompt)
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl LlmProvider for SlowProvider {
        async fn generate_completion(&self, _prompt: String) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok("too late".to_string())
        }
    }

    #[test]
    fn test_llm_service_disabled_without_key() {
        let service = LlmService::new(LlmConfig::default());
        assert!(!service.is_enabled());
    }

    #[test]
    fn test_llm_service_enabled_with_key() {
        let config = LlmConfig {
            api_key: Some("test-key".to_string()),
            ..LlmConfig::default()
        };
        assert!(LlmService::new(config).is_enabled());
    }

    #[tokio::test]
    async fn test_llm_service_returns_disabled_error() {
        let service = LlmService::disabled(LlmConfig::default());
        let result = service.generate_completion("test".to_string()).await;
        assert!(matches!(result, Err(LlmError::Disabled)));
    }

    #[tokio::test]
    async fn test_single_call_per_completion() {
        let provider = Arc::new(EchoProvider {
            calls: AtomicUsize::new(0),
        });
        let service = LlmService::with_provider(LlmConfig::default(), provider.clone());

        let result = service.generate_completion("hello".to_string()).await.unwrap();
        assert_eq!(result, "hello");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_turns_into_timeout() {
        let config = LlmConfig {
            request_timeout: Duration::from_secs(2),
            ..LlmConfig::default()
        };
        let service = LlmService::with_provider(config, Arc::new(SlowProvider));

        let result = service.generate_completion("slow".to_string()).await;
        assert!(matches!(result, Err(LlmError::Timeout)));
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "```json\n{\"a\":" }, { "text": "1}\n```" }]
                    }
                },
                { "content": { "role": "model", "parts": [{ "text": "ignored" }] } }
            ],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 5,
                "totalTokenCount": 15
            }
        }))
        .unwrap();

        assert_eq!(body.into_text().unwrap(), "```json\n{\"a\":1}\n```");
    }

    #[test]
    fn test_response_without_candidates_is_invalid() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(body.into_text(), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_request_serializes_prompt_as_single_text_part() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("prompt".to_string()),
                }],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["contents"][0]["role"], "user");
    }
}
