//! Financial narrative service.
//!
//! An axum backend that turns raw financial-statement text into a structured
//! narrative via a hosted generative model, plus a relay to an external
//! multilingual chat service. The [`client`] module holds the consumer side:
//! a sequenced HTTP client, the dashboard renderer and the chat session log.

pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::create_app;
pub use config::AppConfig;
pub use state::AppState;
