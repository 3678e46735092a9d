use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Body of `POST /generate-narrative`
///
/// `fileContent` is kept as a raw JSON value so a wrong type becomes a
/// validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeRequest {
    #[serde(rename = "fileContent", default)]
    pub file_content: Option<Value>,
}

impl NarrativeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            file_content: Some(Value::String(text.into())),
        }
    }

    /// The statement text, if it is a non-empty string
    pub fn text(&self) -> Result<&str, AppError> {
        match self.file_content.as_ref().and_then(Value::as_str) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(AppError::Validation("Valid file content is required".to_string())),
        }
    }
}

/// Expected shape of a generated narrative document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialNarrative {
    pub company_overview: CompanyOverview,
    pub financial_story_sections: FinancialStorySections,
    pub comprehensive_narrative: ComprehensiveNarrative,
    pub key_performance_indicators: KeyPerformanceIndicators,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub name: String,
    pub storytelling_approach: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStorySections {
    pub income_statement_narrative: StorySection,
    pub balance_sheet_narrative: StorySection,
    pub cash_flow_narrative: StorySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySection {
    pub title: String,
    pub key_insights: Vec<String>,
    pub story: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveNarrative {
    pub title: String,
    pub story: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPerformanceIndicators {
    pub revenue_growth: String,
    pub net_income_growth: String,
    pub asset_growth: String,
}
