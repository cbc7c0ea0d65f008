use std::time::Duration;

use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Check that the application answers at `url` before paying for a browser launch.
///
/// Any HTTP status below 500 counts as reachable: the dashboard redirects
/// unauthenticated requests, which is fine here.
pub fn check_reachable(url: &str, timeout: Duration) -> E2eResult<u16> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send().map_err(|e| E2eError::Preflight {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status().as_u16();
    debug!(url, status, "preflight response");

    if status >= 500 {
        return Err(E2eError::Preflight {
            url: url.to_string(),
            reason: format!("server answered {}", status),
        });
    }
    Ok(status)
}
