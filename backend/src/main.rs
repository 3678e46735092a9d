use std::net::SocketAddr;

use tokio::net::TcpListener;

use narrative_backend::config::AppConfig;
use narrative_backend::logging::{init_logging, LoggingConfig};
use narrative_backend::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;
    let addr = SocketAddr::new(config.bind_addr, config.port);

    let state = AppState::from_config(config);
    let app = create_app(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Narrative backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
