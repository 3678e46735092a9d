use serde::Deserialize;
use serde_json::Value;

pub const PLACEHOLDER_TITLE: &str = "Section Unavailable";
pub const PLACEHOLDER_TEXT: &str = "Data for this section is not available.";
pub const COMPREHENSIVE_TITLE_FALLBACK: &str = "Comprehensive Narrative Unavailable";
pub const COMPREHENSIVE_STORY_FALLBACK: &str = "No comprehensive story available.";
const DEFAULT_TITLE: &str = "Financial Narrative";

/// The three fixed statement slots, in display order
const SECTION_SLOTS: [(&str, &str); 3] = [
    ("income_statement_narrative", "Income Statement"),
    ("balance_sheet_narrative", "Balance Sheet"),
    ("cash_flow_narrative", "Cash Flow"),
];

const KNOWN_KPIS: [&str; 3] = ["revenue_growth", "net_income_growth", "asset_growth"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionView {
    pub title: String,
    pub key_insights: Vec<String>,
    pub story: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSlot {
    pub heading: &'static str,
    pub section: Option<SectionView>,
}

/// Lenient view over a narrative document; absent parts become `None`
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeView {
    pub company_name: Option<String>,
    pub storytelling_approach: Option<String>,
    pub sections: Vec<SectionSlot>,
    pub comprehensive_title: Option<String>,
    pub comprehensive_story: Option<String>,
    pub kpis: Vec<(String, String)>,
}

impl NarrativeView {
    pub fn from_value(narrative: &Value) -> Self {
        let text_at = |pointer: &str| {
            narrative
                .pointer(pointer)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let sections = SECTION_SLOTS
            .iter()
            .map(|&(key, heading)| SectionSlot {
                heading,
                section: narrative
                    .get("financial_story_sections")
                    .and_then(|s| s.get(key))
                    .filter(|s| s.is_object())
                    .and_then(|s| serde_json::from_value::<SectionView>(s.clone()).ok()),
            })
            .collect();

        Self {
            company_name: text_at("/company_overview/name").filter(|n| !n.is_empty()),
            storytelling_approach: text_at("/company_overview/storytelling_approach"),
            sections,
            comprehensive_title: text_at("/comprehensive_narrative/title"),
            comprehensive_story: text_at("/comprehensive_narrative/story"),
            kpis: collect_kpis(narrative.get("key_performance_indicators")),
        }
    }

    pub fn title(&self) -> &str {
        self.company_name.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}

/// Known indicators first, then any extras the model added
fn collect_kpis(indicators: Option<&Value>) -> Vec<(String, String)> {
    let Some(Value::Object(map)) = indicators else {
        return Vec::new();
    };

    let display = |value: &Value| match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };

    let known = KNOWN_KPIS
        .iter()
        .filter_map(|key| map.get(*key).and_then(display).map(|v| (key.to_string(), v)));
    let extra = map
        .iter()
        .filter(|(key, _)| !KNOWN_KPIS.contains(&key.as_str()))
        .filter_map(|(key, value)| display(value).map(|v| (key.clone(), v)));

    known.chain(extra).collect()
}

fn kpi_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

/// Render a narrative document as a plain-text dashboard
pub fn render_dashboard(narrative: &Value) -> String {
    let view = NarrativeView::from_value(narrative);
    let mut lines = vec![format!("=== {} ===", view.title())];

    if let Some(approach) = &view.storytelling_approach {
        lines.push(approach.clone());
    }

    for slot in &view.sections {
        lines.push(String::new());
        lines.push(format!("--- {} ---", slot.heading));
        match &slot.section {
            Some(section) => {
                lines.push(section.title.clone());
                lines.push(String::new());
                lines.push("Key Insights".to_string());
                lines.extend(section.key_insights.iter().map(|i| format!("  • {}", i)));
                lines.push(String::new());
                lines.push("Narrative".to_string());
                lines.push(section.story.clone());
            }
            None => {
                lines.push(PLACEHOLDER_TITLE.to_string());
                lines.push(PLACEHOLDER_TEXT.to_string());
            }
        }
    }

    let comprehensive_title = view
        .comprehensive_title
        .as_deref()
        .unwrap_or(COMPREHENSIVE_TITLE_FALLBACK);
    let comprehensive_story = view
        .comprehensive_story
        .as_deref()
        .unwrap_or(COMPREHENSIVE_STORY_FALLBACK);
    lines.push(String::new());
    lines.push(format!("--- {} ---", comprehensive_title));
    lines.push(comprehensive_story.to_string());

    if !view.kpis.is_empty() {
        let tiles: Vec<String> = view
            .kpis
            .iter()
            .map(|(key, value)| format!("[ {}: {} ]", kpi_label(key), value))
            .collect();
        lines.push(String::new());
        lines.push(tiles.join("  "));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
