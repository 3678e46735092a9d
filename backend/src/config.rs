use std::net::IpAddr;
use std::time::Duration;

use crate::errors::ConfigError;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_API_URL: &str = "https://chat-bot-api-31xd.onrender.com/chat";

/// Configuration for the hosted generative model
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_API_BASE.to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl LlmConfig {
    /// The API key, if one is set and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Configuration for the external chat service
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeConfig {
    /// Reject model output that does not match the narrative document shape
    pub strict_schema: bool,
}

/// Process configuration, built once at start-up
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub llm: LlmConfig,
    pub chat: ChatConfig,
    pub narrative: NarrativeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            llm: LlmConfig::default(),
            chat: ChatConfig::default(),
            narrative: NarrativeConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                name: "BIND_ADDR",
                expected: "an IP address",
                value: raw.clone(),
            })?,
            None => defaults.bind_addr,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                expected: "a port number",
                value: raw.clone(),
            })?,
            None => defaults.port,
        };

        let llm = LlmConfig {
            api_key: lookup("GEMINI_API_KEY").filter(|k| !k.is_empty()),
            model: lookup("GEMINI_MODEL").unwrap_or(defaults.llm.model),
            base_url: lookup("GEMINI_API_BASE")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.llm.base_url),
            request_timeout: parse_secs(&lookup, "LLM_TIMEOUT_SECS")?
                .unwrap_or(defaults.llm.request_timeout),
        };

        let chat = ChatConfig {
            endpoint: lookup("CHAT_API_URL").unwrap_or(defaults.chat.endpoint),
            request_timeout: parse_secs(&lookup, "CHAT_TIMEOUT_SECS")?
                .unwrap_or(defaults.chat.request_timeout),
        };

        let narrative = NarrativeConfig {
            strict_schema: lookup("NARRATIVE_STRICT_SCHEMA")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        Ok(Self {
            bind_addr,
            port,
            llm,
            chat,
            narrative,
        })
    }
}

fn parse_secs<F>(lookup: &F, name: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
            _ => Err(ConfigError::InvalidValue {
                name,
                expected: "a positive number of seconds",
                value: raw,
            }),
        },
        None => Ok(None),
    }
}
