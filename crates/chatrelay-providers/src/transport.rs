//! Shared reqwest plumbing for the upstream clients.

use std::time::Duration;

use chatrelay_core::ChatError;
use reqwest::StatusCode;

/// Map a reqwest failure to [`ChatError::Transport`].
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> ChatError {
    if err.is_timeout() {
        ChatError::Transport(format!("request timed out after {}s", timeout.as_secs()))
    } else {
        ChatError::Transport(err.to_string())
    }
}

/// Send a prepared request and read the full body as text.
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<(StatusCode, String), ChatError> {
    let response = request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    Ok((status, body))
}
