use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use narrative_backend::client::{
    render_dashboard, ChatSession, NarrativeClient, NarrativeOutcome, Sender,
};
use narrative_backend::models::SupportedLanguage;
use narrative_backend::services::chat_service::HttpChatProvider;

/// Terminal client for the financial narrative service
#[derive(Parser)]
#[command(name = "narrate", version, about)]
struct Cli {
    /// Base URL of the narrative backend
    #[arg(long, env = "NARRATIVE_SERVER", default_value = "http://localhost:3001", global = true)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate and display a narrative for a financial statement
    Narrative {
        /// Statement file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Print the raw JSON instead of the dashboard
        #[arg(long)]
        json: bool,
    },
    /// Ask the multilingual finance assistant a question
    Chat {
        #[arg(long, short, default_value = "english")]
        language: SupportedLanguage,
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Narrative { file, json } => run_narrative(&cli.server, file, json).await,
        Command::Chat { language, message } => {
            run_chat(&cli.server, language, &message.join(" ")).await
        }
    }
}

async fn run_narrative(server: &str, file: Option<PathBuf>, json: bool) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        }
    };

    if text.trim().is_empty() {
        bail!("No financial data provided");
    }

    let client = NarrativeClient::new(server)?;
    eprintln!("Loading financial narrative...");

    match client.generate(&text).await? {
        NarrativeOutcome::Fresh { narrative, .. } if json => {
            println!("{}", serde_json::to_string_pretty(&narrative)?);
        }
        NarrativeOutcome::Fresh { narrative, .. } => print!("{}", render_dashboard(&narrative)),
        NarrativeOutcome::Stale { sequence } => bail!("narrative #{} was superseded", sequence),
    }

    Ok(())
}

async fn run_chat(server: &str, language: SupportedLanguage, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        bail!("Message is empty");
    }

    let provider = HttpChatProvider::new(format!("{}/chat", server.trim_end_matches('/')))?;
    let mut session = ChatSession::new(language);

    eprintln!("Assistant is typing...");
    session.send(&provider, message).await;

    for entry in session.messages() {
        let who = match entry.sender {
            Sender::User => "you",
            Sender::Bot => "assistant",
        };
        println!("[{}] {}: {}", entry.timestamp.format("%H:%M:%S"), who, entry.text);
    }

    Ok(())
}
