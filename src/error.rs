use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    /// Node.js driver process failed to spawn
    #[error("Failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed (driver output, scratch or fixture files)
    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failed (request to the driver)
    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the driver pipes failed
    #[error("Browser session I/O: {0}")]
    SessionIO(String),

    /// The driver answered a command with ok=false or a malformed payload
    #[error("Browser command '{command}' failed: {error}")]
    SessionProtocol { command: String, error: String },

    /// A polled condition did not hold before its deadline
    #[error("Timed out after {}ms waiting for {what}", .elapsed.as_millis())]
    Timeout { what: String, elapsed: Duration },

    /// A retrying expectation never matched
    #[error("Expected {locator} {expectation}, but got {actual}")]
    AssertionFailed {
        locator: String,
        expectation: String,
        actual: String,
    },

    /// A one-shot check on collected values failed
    #[error("Check failed: {0}")]
    CheckFailed(String),

    /// The element exists in the locator table but not on the page
    #[error("Element '{element}' not found: {context}")]
    ElementNotFound { element: String, context: String },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Scratch file {path}: {reason}")]
    Scratch { path: String, reason: String },

    #[error("Preflight check failed for {url}: {reason}")]
    Preflight { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl E2eError {
    pub fn check(msg: impl Into<String>) -> Self {
        E2eError::CheckFailed(msg.into())
    }

    /// Whether this error came from the browser process rather than from the page.
    pub fn is_session_failure(&self) -> bool {
        matches!(
            self,
            E2eError::SubprocessSpawn { .. }
                | E2eError::SessionIO(_)
                | E2eError::JsonParse { .. }
                | E2eError::JsonSerialize { .. }
        )
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
