mod chat;
mod narrative;

pub use chat::{ChatRequest, ChatResponse, SupportedLanguage};
pub use narrative::{
    CompanyOverview, ComprehensiveNarrative, FinancialNarrative, FinancialStorySections,
    KeyPerformanceIndicators, NarrativeRequest, StorySection,
};
