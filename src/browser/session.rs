use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::browser::locator::Locator;
use crate::browser::page::{ClickOptions, Download, ElementProbe, FailedResponse, LoadState, Page};
use crate::browser::protocol::{BrowserRequest, BrowserResponse, LaunchOptions};
use crate::error::{E2eError, E2eResult};

pub const DEFAULT_DRIVER_SCRIPT: &str = "driver/browser_server.js";

/// A persistent browser session backed by browser_server.js.
///
/// Launches a long-lived Node.js process that keeps one Chromium context and
/// page open. Commands are sent as NDJSON over stdin, responses read from
/// stdout, strictly one response per request.
pub struct BrowserSession {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    last_url: Option<String>,
    closed: bool,
}

impl BrowserSession {
    /// Launch a new browser session by spawning the driver script.
    pub fn launch(script: &Path, options: &LaunchOptions) -> E2eResult<Self> {
        let options_json = serde_json::to_string(options).map_err(|e| E2eError::JsonSerialize {
            context: "LaunchOptions".into(),
            source: e,
        })?;

        let script_name = script.display().to_string();
        let mut child = Command::new("node")
            .arg(script)
            .arg(&options_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| E2eError::SubprocessSpawn {
                script: script_name.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            E2eError::SessionIO(format!("Failed to capture stdin of {}", script_name))
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            E2eError::SessionIO(format!("Failed to capture stdout of {}", script_name))
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| E2eError::SessionIO(format!("Failed to read ready signal: {}", e)))?;

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| E2eError::JsonParse {
                context: format!("{} ready signal", script_name),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(E2eError::SessionProtocol {
                command: "launch".into(),
                error: response
                    .error
                    .unwrap_or_else(|| "Did not receive ready signal from driver".into()),
            });
        }

        debug!(script = %script_name, headless = options.headless, "browser session ready");

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            last_url: None,
            closed: false,
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &BrowserRequest) -> E2eResult<BrowserResponse> {
        let json = serde_json::to_string(request).map_err(|e| E2eError::JsonSerialize {
            context: format!("{} request", request.name()),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .map_err(|e| E2eError::SessionIO(format!("Failed to write to driver stdin: {}", e)))?;

        self.stdin
            .flush()
            .map_err(|e| E2eError::SessionIO(format!("Failed to flush driver stdin: {}", e)))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| E2eError::SessionIO(format!("Failed to read from driver stdout: {}", e)))?;

        if line.trim().is_empty() {
            return Err(E2eError::SessionIO(
                "Empty response from driver (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| E2eError::JsonParse {
            context: format!("{} response", request.name()),
            source: e,
        })
    }

    /// Send a request and verify it succeeded.
    fn send_ok(&mut self, request: BrowserRequest) -> E2eResult<BrowserResponse> {
        let response = self.send(&request)?;
        if !response.ok {
            return Err(E2eError::SessionProtocol {
                command: request.name().into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Send a request and decode its `value` payload.
    fn send_value<T: DeserializeOwned>(&mut self, request: BrowserRequest) -> E2eResult<T> {
        let command = request.name();
        let response = self.send_ok(request)?;
        let value = response.value.unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| E2eError::JsonParse {
            context: format!("{} value", command),
            source: e,
        })
    }

    /// Last URL navigated to or read back (cached, no browser call).
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }
}

impl Page for BrowserSession {
    fn goto(&mut self, url: &str, wait_until: LoadState) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Goto {
            url: url.to_string(),
            wait_until,
        })?;
        self.last_url = Some(url.to_string());
        Ok(())
    }

    fn wait_for_load_state(&mut self, state: LoadState) -> E2eResult<()> {
        self.send_ok(BrowserRequest::WaitForLoadState { state })?;
        Ok(())
    }

    fn current_url(&mut self) -> E2eResult<String> {
        let url: String = self.send_value(BrowserRequest::CurrentUrl)?;
        self.last_url = Some(url.clone());
        Ok(url)
    }

    fn title(&mut self) -> E2eResult<String> {
        self.send_value(BrowserRequest::Title)
    }

    fn click(&mut self, locator: &Locator, options: ClickOptions) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Click {
            locator: locator.clone(),
            options,
        })?;
        Ok(())
    }

    fn fill(&mut self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Fill {
            locator: locator.clone(),
            value: value.to_string(),
        })?;
        Ok(())
    }

    fn type_text(&mut self, locator: &Locator, text: &str, delay_ms: Option<u64>) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Type {
            locator: locator.clone(),
            text: text.to_string(),
            delay_ms,
        })?;
        Ok(())
    }

    fn press(&mut self, locator: Option<&Locator>, key: &str) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Press {
            locator: locator.cloned(),
            key: key.to_string(),
        })?;
        Ok(())
    }

    fn clear(&mut self, locator: &Locator) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Clear {
            locator: locator.clone(),
        })?;
        Ok(())
    }

    fn set_input_files(&mut self, locator: &Locator, files: &[PathBuf]) -> E2eResult<()> {
        self.send_ok(BrowserRequest::SetInputFiles {
            locator: locator.clone(),
            files: files.to_vec(),
        })?;
        Ok(())
    }

    fn scroll_into_view(&mut self, locator: &Locator) -> E2eResult<()> {
        self.send_ok(BrowserRequest::ScrollIntoView {
            locator: locator.clone(),
        })?;
        Ok(())
    }

    fn probe(&mut self, locator: &Locator) -> E2eResult<ElementProbe> {
        self.send_value(BrowserRequest::Probe {
            locator: locator.clone(),
        })
    }

    fn attribute(&mut self, locator: &Locator, name: &str) -> E2eResult<Option<String>> {
        self.send_value(BrowserRequest::Attribute {
            locator: locator.clone(),
            name: name.to_string(),
        })
    }

    fn all_texts(&mut self, locator: &Locator) -> E2eResult<Vec<String>> {
        self.send_value(BrowserRequest::AllTexts {
            locator: locator.clone(),
        })
    }

    fn download(&mut self, trigger: &Locator, save_dir: &Path) -> E2eResult<Download> {
        self.send_value(BrowserRequest::Download {
            trigger: trigger.clone(),
            save_dir: save_dir.to_path_buf(),
        })
    }

    fn evaluate(&mut self, script: &str) -> E2eResult<Value> {
        let response = self.send_ok(BrowserRequest::Evaluate {
            script: script.to_string(),
        })?;
        Ok(response.value.unwrap_or(Value::Null))
    }

    fn screenshot(&mut self, path: &Path) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Screenshot {
            path: path.to_path_buf(),
        })?;
        Ok(())
    }

    fn save_storage_state(&mut self, path: &Path) -> E2eResult<()> {
        self.send_ok(BrowserRequest::SaveStorageState {
            path: path.to_path_buf(),
        })?;
        Ok(())
    }

    fn accept_next_dialog(&mut self) -> E2eResult<Option<String>> {
        self.send_value(BrowserRequest::AcceptNextDialog)
    }

    fn take_dialog_message(&mut self) -> E2eResult<Option<String>> {
        self.send_value(BrowserRequest::TakeDialogMessage)
    }

    fn track_responses(&mut self) -> E2eResult<()> {
        self.send_ok(BrowserRequest::TrackResponses)?;
        Ok(())
    }

    fn failed_responses(&mut self) -> E2eResult<Vec<FailedResponse>> {
        self.send_value(BrowserRequest::FailedResponses)
    }

    fn pause(&mut self, ms: u64) -> E2eResult<()> {
        self.send_ok(BrowserRequest::Pause { duration_ms: ms })?;
        Ok(())
    }

    /// Quit the browser session.
    fn close(&mut self) -> E2eResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // Best-effort quit: the process may already be gone
        if let Err(e) = self.send(&BrowserRequest::Quit) {
            warn!("driver did not acknowledge quit: {}", e);
        }
        let _ = self.child.wait();
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
