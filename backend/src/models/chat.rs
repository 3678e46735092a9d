use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the chat service answers in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    #[default]
    English,
    Telugu,
    Hindi,
    Tamil,
    Kannada,
    French,
    Spanish,
    Bengali,
    German,
    Japanese,
    Chinese,
    Arabic,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 12] = [
        SupportedLanguage::English,
        SupportedLanguage::Telugu,
        SupportedLanguage::Hindi,
        SupportedLanguage::Tamil,
        SupportedLanguage::Kannada,
        SupportedLanguage::French,
        SupportedLanguage::Spanish,
        SupportedLanguage::Bengali,
        SupportedLanguage::German,
        SupportedLanguage::Japanese,
        SupportedLanguage::Chinese,
        SupportedLanguage::Arabic,
    ];

    /// Wire code, e.g. `"hindi"`
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::English => "english",
            SupportedLanguage::Telugu => "telugu",
            SupportedLanguage::Hindi => "hindi",
            SupportedLanguage::Tamil => "tamil",
            SupportedLanguage::Kannada => "kannada",
            SupportedLanguage::French => "french",
            SupportedLanguage::Spanish => "spanish",
            SupportedLanguage::Bengali => "bengali",
            SupportedLanguage::German => "german",
            SupportedLanguage::Japanese => "japanese",
            SupportedLanguage::Chinese => "chinese",
            SupportedLanguage::Arabic => "arabic",
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SupportedLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SupportedLanguage::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted)
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

/// Body of `POST /chat`, forwarded as-is to the chat service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub language: SupportedLanguage,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
