//! Chatrelay CLI — runs the chat functions locally.
//!
//! # Commands
//!
//! - `chatrelay invoke <provider> [--event FILE]` — run a function on a raw event (stdin by default)
//! - `chatrelay chat <provider> -m MESSAGE` — send one message, print the reply
//! - `chatrelay status` — show credentials and endpoints per provider

mod helpers;
mod invoke;
mod status;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use chatrelay_core::{ChatMessage, FunctionEvent};
use chatrelay_providers::handler;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Chatrelay — one conversation in, one normalized reply out
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a function on a raw event and print the response envelope
    Invoke {
        /// Provider: openai | yandex
        #[arg(value_parser = helpers::parse_provider)]
        provider: &'static chatrelay_providers::ProviderSpec,

        /// Event JSON file (reads stdin when omitted)
        #[arg(short, long)]
        event: Option<std::path::PathBuf>,
    },

    /// Send a single message and print the reply
    Chat {
        /// Provider: openai | yandex
        #[arg(value_parser = helpers::parse_provider)]
        provider: &'static chatrelay_providers::ProviderSpec,

        /// Message text
        #[arg(short, long)]
        message: String,

        /// Optional system prompt sent before the message
        #[arg(short, long)]
        system: Option<String>,
    },

    /// Show provider configuration status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs, cli.json_logs);

    match cli.command {
        Commands::Invoke { provider, event } => invoke::run(provider, event.as_deref()).await,
        Commands::Chat {
            provider,
            message,
            system,
        } => run_chat(provider, message, system).await,
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(
    spec: &'static chatrelay_providers::ProviderSpec,
    message: String,
    system: Option<String>,
) -> Result<()> {
    let mut messages = Vec::new();
    if let Some(prompt) = system {
        messages.push(ChatMessage::system(prompt));
    }
    messages.push(ChatMessage::user(message));

    let body = serde_json::json!({ "messages": messages }).to_string();
    info!(provider = spec.display_name, "sending single message");

    let response = handler::invoke(spec.kind, FunctionEvent::post(body)).await;
    helpers::print_outcome(spec.display_name, &response);

    if response.status_code != 200 {
        bail!("{} returned status {}", spec.display_name, response.status_code);
    }
    Ok(())
}

/// Initialize tracing/logging. Output goes to stderr so stdout stays parseable.
fn init_logging(verbose: bool, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("chatrelay=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
