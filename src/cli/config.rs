use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::browser::protocol::LaunchOptions;
use crate::browser::session::DEFAULT_DRIVER_SCRIPT;
use crate::harness::HarnessSettings;
use crate::report::ReportFormat;
use crate::wait::WaitConfig;

pub const DEFAULT_CONFIG_FILE: &str = "tailorbird-e2e.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "tailorbird-e2e",
    version,
    about = "Browser-driven end-to-end suites for the Tailorbird web app"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: tailorbird-e2e.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Show the browser window
    #[arg(long, global = true)]
    pub headed: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console, global = true)]
    pub format: ReportFormat,

    /// Output file path (default: stdout for console, report.html / report.xml for others)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Dashboard URL every suite starts from
    #[arg(long, env = "DASHBOARD_URL", global = true)]
    pub dashboard_url: Option<String>,

    /// Organization settings URL
    #[arg(long, env = "ORGANIZATION_URL", global = true)]
    pub organization_url: Option<String>,

    /// Preferred property option when creating projects
    #[arg(long = "property-option", env = "OPTION", global = true)]
    pub property_option: Option<String>,

    /// Path to the Node.js browser driver
    #[arg(long, env = "E2E_DRIVER", global = true)]
    pub driver: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run built-in suites
    Run {
        /// Suite name, or "all" for every suite in order
        #[arg(long, default_value = "all")]
        suite: String,

        /// Only run cases whose name or tag contains this text (e.g. @sanity)
        #[arg(long)]
        grep: Option<String>,

        /// JSONL file receiving case lifecycle events
        #[arg(long)]
        trace: Option<String>,
    },

    /// Run declarative test specs from YAML files
    Spec {
        /// Path to test spec YAML file or directory of YAML files
        #[arg(long)]
        spec: String,
    },

    /// List built-in suites and their cases
    List {
        /// Only list cases whose name or tag contains this text
        #[arg(long)]
        grep: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `tailorbird-e2e.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub urls: UrlConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub paths: PathConfig,
    /// Check the dashboard answers over HTTP before launching the browser
    #[serde(default = "default_true")]
    pub preflight: bool,
    /// Case event trace file used when `run --trace` is not given
    pub trace: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            urls: UrlConfig::default(),
            browser: BrowserConfig::default(),
            timeouts: TimeoutConfig::default(),
            paths: PathConfig::default(),
            preflight: true,
            trace: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlConfig {
    pub dashboard: Option<String>,
    pub organization: Option<String>,
    pub property_option: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_driver")]
    pub driver: String,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Playwright storage state holding a logged-in session
    pub storage_state: Option<String>,

    /// CSS zoom applied to the app shell after each load
    #[serde(default = "default_zoom")]
    pub zoom: Option<String>,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            headless: true,
            storage_state: None,
            zoom: default_zoom(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_expect_ms")]
    pub expect_ms: u64,

    #[serde(default = "default_action_ms")]
    pub action_ms: u64,

    #[serde(default = "default_navigation_ms")]
    pub navigation_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            expect_ms: default_expect_ms(),
            action_ms: default_action_ms(),
            navigation_ms: default_navigation_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Root of the scratch files suites hand to each other
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_download_dir")]
    pub download_dir: String,

    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: String,

    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: String,

    #[serde(default = "default_files_dir")]
    pub files_dir: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            download_dir: default_download_dir(),
            artifact_dir: default_artifact_dir(),
            fixtures_dir: default_fixtures_dir(),
            files_dir: default_files_dir(),
        }
    }
}

// Serde default helpers
fn default_true() -> bool { true }
fn default_driver() -> String { DEFAULT_DRIVER_SCRIPT.to_string() }
fn default_zoom() -> Option<String> { Some("70%".to_string()) }
fn default_viewport_width() -> u32 { 1440 }
fn default_viewport_height() -> u32 { 900 }
fn default_expect_ms() -> u64 { 5_000 }
fn default_action_ms() -> u64 { 10_000 }
fn default_navigation_ms() -> u64 { 30_000 }
fn default_data_dir() -> String { ".".to_string() }
fn default_download_dir() -> String { "downloads".to_string() }
fn default_artifact_dir() -> String { "artifacts".to_string() }
fn default_fixtures_dir() -> String { "fixtures".to_string() }
fn default_files_dir() -> String { "files".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => {
            debug!(path = config_path, "no config file, using defaults");
            AppConfig::default()
        }
    }
}

// ============================================================================
// Resolution (merge CLI args with config file)
// ============================================================================

/// Everything a command needs, after CLI > env > config file > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub driver: PathBuf,
    pub launch: LaunchOptions,
    pub waits: WaitConfig,
    pub settings: HarnessSettings,
    pub data_dir: PathBuf,
    pub fixtures_dir: PathBuf,
    pub preflight: bool,
    pub trace: Option<PathBuf>,
}

/// Merge CLI flags (which already carry their env fallbacks) over the config file.
pub fn resolve(cli: &Cli, config: &AppConfig) -> RunContext {
    let pick = |flag: &Option<String>, file: &Option<String>| {
        flag.clone().or_else(|| file.clone()).unwrap_or_default()
    };

    let settings = HarnessSettings {
        dashboard_url: pick(&cli.dashboard_url, &config.urls.dashboard),
        organization_url: pick(&cli.organization_url, &config.urls.organization),
        preferred_option: cli
            .property_option
            .clone()
            .or_else(|| config.urls.property_option.clone())
            .filter(|o| !o.trim().is_empty()),
        download_dir: PathBuf::from(&config.paths.download_dir),
        artifact_dir: PathBuf::from(&config.paths.artifact_dir),
        files_dir: PathBuf::from(&config.paths.files_dir),
    };

    let launch = LaunchOptions {
        headless: config.browser.headless && !cli.headed,
        storage_state: config.browser.storage_state.as_ref().map(PathBuf::from),
        viewport_width: config.browser.viewport_width,
        viewport_height: config.browser.viewport_height,
        shell_zoom: config.browser.zoom.clone().filter(|z| !z.trim().is_empty()),
        default_timeout_ms: config.timeouts.navigation_ms,
    };

    let trace = match &cli.command {
        Commands::Run { trace: Some(path), .. } => Some(PathBuf::from(path)),
        _ => config.trace.as_ref().map(PathBuf::from),
    };

    RunContext {
        driver: PathBuf::from(cli.driver.as_deref().unwrap_or(&config.browser.driver)),
        launch,
        waits: WaitConfig::from_millis(
            config.timeouts.expect_ms,
            config.timeouts.action_ms,
            config.timeouts.navigation_ms,
        ),
        settings,
        data_dir: PathBuf::from(&config.paths.data_dir),
        fixtures_dir: PathBuf::from(&config.paths.fixtures_dir),
        preflight: config.preflight,
        trace,
    }
}
