//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The browser owns the terminal while it runs, so browse-mode logs go to a
//! file when one is configured and are dropped otherwise. Import mode logs to
//! stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level_filter: LevelFilter,
    pub target: LogTarget,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            target: LogTarget::Stderr,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Browse mode: a log file if given, otherwise nothing reaches the screen.
    #[must_use]
    pub fn for_browse(level_filter: LevelFilter, log_file: Option<PathBuf>) -> Self {
        let target = match log_file {
            Some(path) => LogTarget::File(path),
            None => LogTarget::Discard,
        };
        Self {
            level_filter,
            with_ansi: false,
            target,
        }
    }

    /// Import mode: stderr unless a log file is given.
    #[must_use]
    pub fn for_import(level_filter: LevelFilter, log_file: Option<PathBuf>) -> Self {
        match log_file {
            Some(path) => Self {
                level_filter,
                with_ansi: false,
                target: LogTarget::File(path),
            },
            None => Self {
                level_filter,
                ..Self::default()
            },
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.target {
        LogTarget::Stderr => init_with_writer(config, io::stderr),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_with_writer(config, Mutex::new(file))
        }
        LogTarget::Discard => init_with_writer(config, io::sink),
    }
}

fn init_with_writer<W>(config: &LogConfig, writer: W) -> io::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(config.level_filter))
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

/// `RUST_LOG` wins; otherwise our crate at `level`, everything else at warn.
fn build_env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,pokedex={}", level)))
}
