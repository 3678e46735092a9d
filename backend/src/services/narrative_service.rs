use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::error::Category;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::NarrativeConfig;
use crate::errors::AppError;
use crate::models::{
    CompanyOverview, ComprehensiveNarrative, FinancialNarrative, KeyPerformanceIndicators,
    NarrativeRequest, StorySection,
};
use crate::services::llm_service::LlmService;

/// Substitution point inside [`FINANCIAL_NARRATIVE_PROMPT`]
pub const INPUT_PLACEHOLDER: &str = "{input_text}";

pub const FINANCIAL_NARRATIVE_PROMPT: &str = r#"
Generate a detailed, human-readable JSON narrative that translates complex financial data into an engaging, accessible story across three key financial statement sections.

Input Financial Data:
{input_text}

Output JSON Structure:
{
    "company_overview": {
        "name": "[COMPANY NAME]",
        "storytelling_approach": "Narrative exploration of financial performance"
    },
    "financial_story_sections": {
        "income_statement_narrative": {
            "title": "[CREATIVE TITLE]",
            "key_insights": ["Insight 1", "Insight 2", "Insight 3"],
            "story": "[NARRATIVE PARAGRAPH(S)]"
        },
        "balance_sheet_narrative": {
            "title": "[CREATIVE TITLE]",
            "key_insights": ["Insight 1", "Insight 2", "Insight 3"],
            "story": "[NARRATIVE PARAGRAPH(S)]"
        },
        "cash_flow_narrative": {
            "title": "[CREATIVE TITLE]",
            "key_insights": ["Insight 1", "Insight 2", "Insight 3"],
            "story": "[NARRATIVE PARAGRAPH(S)]"
        }
    },
    "comprehensive_narrative": {
        "title": "[OVERARCHING STORY TITLE]",
        "story": "[COMPREHENSIVE NARRATIVE PARAGRAPH(S)]"
    },
    "key_performance_indicators": {
        "revenue_growth": "[PERCENTAGE]",
        "net_income_growth": "[PERCENTAGE]",
        "asset_growth": "[PERCENTAGE]"
    }
}

Storytelling Guidelines:
- Use conversational and accessible language
- Focus on human elements and strategic decisions
- Avoid financial jargon
- Translate numbers into a compelling story
"#;

const STORY_SECTIONS: [&str; 3] = [
    "income_statement_narrative",
    "balance_sheet_narrative",
    "cash_flow_narrative",
];

/// Generate a narrative document from raw financial statement text
///
/// Fails with a configuration error before anything else when no provider
/// is configured, then with a validation error for empty or non-string
/// input. Exactly one provider call is made otherwise.
pub async fn generate_narrative(
    llm_service: &LlmService,
    config: &NarrativeConfig,
    request: &NarrativeRequest,
) -> Result<Value, AppError> {
    if !llm_service.is_enabled() {
        return Err(AppError::Configuration("API key not configured".to_string()));
    }

    let text = request.text()?;
    info!("Generating financial narrative ({} chars of input)", text.len());

    let prompt = build_narrative_prompt(text);

    let raw = llm_service.generate_completion(prompt).await.map_err(|e| {
        error!("Narrative generation failed upstream: {}", e);
        AppError::Llm(e)
    })?;

    let narrative = parse_narrative_response(&raw)?;

    if config.strict_schema {
        validate_narrative_shape(&narrative)?;
    }

    Ok(narrative)
}

/// Insert the statement text into the prompt template, verbatim and once
pub fn build_narrative_prompt(input: &str) -> String {
    FINANCIAL_NARRATIVE_PROMPT.replacen(INPUT_PLACEHOLDER, input, 1)
}

/// Strip Markdown code fences and surrounding whitespace from a completion
pub fn clean_completion(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Clean and parse a raw completion into a JSON document
pub fn parse_narrative_response(raw: &str) -> Result<Value, AppError> {
    let cleaned = clean_completion(raw);
    debug!("cleaned text: {}", cleaned);

    let narrative: Value = serde_json::from_str(&cleaned).map_err(|e| {
        error!("Failed to parse LLM response as JSON: {} (response: {})", e, cleaned);
        AppError::Parse(describe_parse_failure(&e))
    })?;

    debug!("narrative JSON: {}", narrative);
    Ok(narrative)
}

fn describe_parse_failure(e: &serde_json::Error) -> String {
    let class = match e.classify() {
        Category::Syntax => "syntax error",
        Category::Eof => "unexpected end of input",
        Category::Data => "unexpected data",
        Category::Io => "read failure",
    };
    format!(
        "Model response was not valid JSON ({} at line {} column {})",
        class,
        e.line(),
        e.column()
    )
}

/// Structural check of a parsed document against [`FinancialNarrative`]
///
/// On mismatch every offending part is reported, not just the first.
pub fn validate_narrative_shape(narrative: &Value) -> Result<(), AppError> {
    let first_error = match FinancialNarrative::deserialize(narrative) {
        Ok(typed) => {
            debug!("Narrative for {} matches expected shape", typed.company_overview.name);
            return Ok(());
        }
        Err(e) => e,
    };

    let mut problems = Vec::new();
    check_part::<CompanyOverview>(narrative, "/company_overview", &mut problems);
    if narrative.pointer("/financial_story_sections").is_some() {
        for section in STORY_SECTIONS {
            let pointer = format!("/financial_story_sections/{}", section);
            check_part::<StorySection>(narrative, &pointer, &mut problems);
        }
    } else {
        problems.push("/financial_story_sections is missing".to_string());
    }
    check_part::<ComprehensiveNarrative>(narrative, "/comprehensive_narrative", &mut problems);
    check_part::<KeyPerformanceIndicators>(narrative, "/key_performance_indicators", &mut problems);

    if problems.is_empty() {
        problems.push(first_error.to_string());
    }
    Err(AppError::Schema(problems))
}

fn check_part<T: DeserializeOwned>(narrative: &Value, pointer: &str, problems: &mut Vec<String>) {
    match narrative.pointer(pointer) {
        Some(part) => {
            if let Err(e) = T::deserialize(part) {
                problems.push(format!("{}: {}", pointer, e));
            }
        }
        None => problems.push(format!("{} is missing", pointer)),
    }
}
