pub mod chat_service;
pub mod llm_service;
pub mod narrative_service;
