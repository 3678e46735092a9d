use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::chat_service::ChatService;
use crate::services::llm_service::LlmService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub llm_service: Arc<LlmService>,
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    /// Wire the production services from configuration
    pub fn from_config(config: AppConfig) -> Self {
        let llm_service = Arc::new(LlmService::new(config.llm.clone()));
        let chat_service = Arc::new(ChatService::new(config.chat.clone()));
        Self {
            config: Arc::new(config),
            llm_service,
            chat_service,
        }
    }
}
