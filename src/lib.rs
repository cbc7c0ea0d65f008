use tracing_subscriber::EnvFilter;

pub mod browser;
pub mod cli;
pub mod data;
pub mod error;
pub mod expect;
pub mod harness;
pub mod locators;
pub mod pages;
pub mod report;
pub mod spec;
pub mod suite;
pub mod trace;
pub mod wait;

pub use error::{E2eError, E2eResult};
pub use harness::{Harness, HarnessSettings};

/// Install the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level for
/// this crate (warn, info, debug, trace).
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tailorbird_e2e={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
