//! `chatrelay invoke` — run a function on a raw platform event.
//!
//! Prints the response envelope exactly as the platform would receive it.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use chatrelay_providers::{handler, ProviderSpec};

use crate::helpers;

/// Run the invoke command.
pub async fn run(spec: &'static ProviderSpec, event_path: Option<&Path>) -> Result<()> {
    let event = helpers::read_event(event_path)?;
    debug!(
        provider = spec.display_name,
        method = %event.http_method,
        "invoking function"
    );

    let response = handler::invoke(spec.kind, event).await;
    let out = serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{out}");
    Ok(())
}
