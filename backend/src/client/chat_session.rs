use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::ChatError;
use crate::models::{ChatRequest, ChatResponse, SupportedLanguage};
use crate::services::chat_service::ChatProvider;

pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub language: SupportedLanguage,
}

impl ChatMessage {
    fn new(text: String, sender: Sender, language: SupportedLanguage) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            sender,
            timestamp: Utc::now(),
            language,
        }
    }
}

/// Ordered chat log with a typing indicator
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    language: SupportedLanguage,
    typing: bool,
}

impl ChatSession {
    pub fn new(language: SupportedLanguage) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }

    pub fn set_language(&mut self, language: SupportedLanguage) {
        self.language = language;
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Record the user's message and build the outgoing request
    ///
    /// Blank input is ignored and yields `None`.
    pub fn begin(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }

        self.messages
            .push(ChatMessage::new(text.to_string(), Sender::User, self.language));
        self.typing = true;

        Some(ChatRequest {
            query: text.to_string(),
            language: self.language,
            debug: false,
        })
    }

    /// Append the reply, or the fallback message on failure
    pub fn complete(&mut self, result: Result<ChatResponse, ChatError>) {
        let message = match result {
            Ok(reply) => ChatMessage::new(reply.response, Sender::Bot, self.language),
            Err(e) => {
                tracing::warn!("Error processing message: {}", e);
                ChatMessage::new(
                    FALLBACK_REPLY.to_string(),
                    Sender::Bot,
                    SupportedLanguage::English,
                )
            }
        };
        self.messages.push(message);
        self.typing = false;
    }

    /// Send one message through `provider` and record the exchange
    pub async fn send(&mut self, provider: &dyn ChatProvider, text: &str) {
        if let Some(request) = self.begin(text) {
            let result = provider.send(&request).await;
            self.complete(result);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingProvider;

    #[async_trait]
    impl ChatProvider for FailingProvider {
        async fn send(&self, _request: &ChatRequest) -> Result<ChatResponse, ChatError> {
            Err(ChatError::ApiError("HTTP error! Status: 503".to_string()))
        }
    }

    struct ShoutingProvider;

    #[async_trait]
    impl ChatProvider for ShoutingProvider {
        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
            Ok(ChatResponse {
                response: request.query.to_uppercase(),
            })
        }
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let mut session = ChatSession::new(SupportedLanguage::French);
        assert!(session.begin("   ").is_none());
        assert!(session.messages().is_empty());
        assert!(!session.is_typing());
    }

    #[test]
    fn test_typing_between_begin_and_complete() {
        let mut session = ChatSession::new(SupportedLanguage::French);
        let request = session.begin("bonjour").unwrap();
        assert_eq!(request.language, SupportedLanguage::French);
        assert!(session.is_typing());

        session.complete(Ok(ChatResponse {
            response: "salut".to_string(),
        }));
        assert!(!session.is_typing());
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_send_appends_in_order() {
        let mut session = ChatSession::new(SupportedLanguage::English);
        session.send(&ShoutingProvider, "first").await;
        session.send(&ShoutingProvider, "second").await;

        let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "FIRST", "second", "SECOND"]);
        assert_eq!(session.messages()[1].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn test_failure_appends_english_fallback() {
        let mut session = ChatSession::new(SupportedLanguage::Hindi);
        session.send(&FailingProvider, "namaste").await;

        let reply = &session.messages()[1];
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(reply.language, SupportedLanguage::English);
        assert!(!session.is_typing());

        session.clear();
        assert!(session.messages().is_empty());
    }
}
