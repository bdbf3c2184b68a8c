//! Shared CLI helpers — argument parsing, event loading, reply printing.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use chatrelay_core::{FunctionEvent, FunctionResponse};
use chatrelay_providers::{find_by_name, ProviderSpec, PROVIDERS};

/// clap value parser for the provider argument.
pub fn parse_provider(name: &str) -> Result<&'static ProviderSpec, String> {
    find_by_name(name).ok_or_else(|| {
        let known: Vec<&str> = PROVIDERS.iter().map(|s| s.name).collect();
        format!("unknown provider '{}' (expected one of: {})", name, known.join(", "))
    })
}

/// Read a function event from `path`, or from stdin when `None`.
pub fn read_event(path: Option<&Path>) -> Result<FunctionEvent> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read event file: {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };
    parse_event(&raw)
}

/// Parse a function event from JSON text.
pub fn parse_event(raw: &str) -> Result<FunctionEvent> {
    serde_json::from_str(raw).context("event is not a valid function event JSON")
}

/// Print a function response in human form.
pub fn print_outcome(display_name: &str, response: &FunctionResponse) {
    println!();
    let body = response.body_json().unwrap_or_default();

    if response.status_code == 200 {
        println!("{}", display_name.cyan().bold());
        match body["message"].as_str() {
            Some(text) if !text.is_empty() => println!("{text}"),
            _ => println!("{}", "(no response)".dimmed()),
        }
        if let Some(model) = body["model"].as_str() {
            println!("{}", format!("model: {model} | usage: {}", body["usage"]).dimmed());
        }
    } else {
        let error = body["error"].as_str().unwrap_or("(no error message)");
        println!(
            "{} {}",
            format!("✗ {} {}", display_name, response.status_code).red().bold(),
            error
        );
    }
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
