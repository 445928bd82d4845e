//! Tracing setup for leadform binaries.
//!
//! Filter directives are read from `LEADFORM_LOG`, then `RUST_LOG`, and fall
//! back to the level the caller passes. Everything is written to stderr;
//! stdout carries command output only.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crate-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "LEADFORM_LOG";

/// Shape of each log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, colored when stderr is a terminal.
    #[default]
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is left in place.
pub fn init_tracing(format: LogFormat, level: Level) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(level));
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Pretty => registry
            .with(layer.with_ansi(std::io::stderr().is_terminal()))
            .try_init(),
    };
    installed.is_ok()
}
