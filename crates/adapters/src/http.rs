// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared blocking HTTP plumbing

use std::time::Duration;

/// Build an agent whose calls all share one overall timeout
pub(crate) fn agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Run a blocking HTTP call off the async runtime
///
/// A panicked or cancelled worker surfaces through `on_join`.
pub(crate) async fn run_blocking<T, E, F>(call: F, on_join: fn(String) -> E) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => result,
        Err(e) => Err(on_join(e.to_string())),
    }
}

/// Read a response body as text
pub(crate) fn read_body(
    response: &mut ureq::http::Response<ureq::Body>,
) -> Result<String, ureq::Error> {
    response.body_mut().read_to_string()
}
