//! `chatrelay status` — show configuration and provider status.
//!
//! - Shows the config file in use, if any
//! - Shows credential status, model and endpoint for each provider

use anyhow::Result;
use colored::Colorize;

use chatrelay_core::config::{load_config, CONFIG_PATH_ENV};
use chatrelay_providers::PROVIDERS;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);

    println!();
    println!("{}", "Chatrelay Status".cyan().bold());
    println!();

    // Config file
    match std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()) {
        Some(path) => {
            let exists = std::path::Path::new(&path).exists();
            println!(
                "  {:<14} {} {}",
                "Config:".bold(),
                path,
                if exists {
                    "✓".green().to_string()
                } else {
                    "(not found)".red().to_string()
                }
            );
        }
        None => println!(
            "  {:<14} {}",
            "Config:".bold(),
            format!("defaults (set {CONFIG_PATH_ENV} to load a file)").dimmed()
        ),
    }

    // Providers
    println!();
    println!("  {}", "Providers:".bold());

    for spec in PROVIDERS {
        let status = if spec.is_configured(&config) {
            format!("{} (credentials set)", "✓".green())
        } else {
            format!("{} missing {}", "·".dimmed(), spec.env_keys.join(" / ").dimmed())
        };
        println!("    {:<12} {}", spec.display_name, status);
        println!(
            "    {:<12} {}",
            "",
            format!("model: {} | {}", spec.model(&config), spec.endpoint(&config)).dimmed()
        );
    }

    println!();

    Ok(())
}
