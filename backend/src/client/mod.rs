pub mod chat_session;
pub mod dashboard;
pub mod narrative_client;

pub use chat_session::{ChatMessage, ChatSession, Sender};
pub use dashboard::{render_dashboard, NarrativeView};
pub use narrative_client::{ClientError, NarrativeClient, NarrativeOutcome, RequestSequencer};
