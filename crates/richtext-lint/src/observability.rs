//! Logging setup: human-readable logs on stderr, JSONL logs in a file.
//!
//! The log file location is resolved in this order:
//! 1. `RICHTEXT_LINT_LOG_PATH` (exact file, not rotated)
//! 2. `RICHTEXT_LINT_LOG_DIR` (daily-rotated `richtext-lint.jsonl`)
//! 3. `log_dir` from configuration
//! 4. The platform data directory (`~/.local/share/richtext-lint/logs`)
//!
//! If none of these can be created, only stderr logging is set up.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "RICHTEXT_LINT_LOG_PATH";
const LOG_DIR_ENV: &str = "RICHTEXT_LINT_LOG_DIR";
const LOG_FILE_NAME: &str = "richtext-lint.jsonl";

/// Where JSONL logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A single file, appended to.
    File(PathBuf),
    /// A directory holding daily-rotated files.
    Directory(PathBuf),
    /// No file logging.
    Disabled,
}

/// Resolved logging configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// JSONL log destination.
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Resolve the log destination from the environment, falling back to
    /// `config_log_dir` and then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let target = if let Some(path) = log_path {
            LogTarget::File(path)
        } else if let Some(dir) = log_dir.or(config_log_dir).or_else(default_log_dir) {
            LogTarget::Directory(dir)
        } else {
            LogTarget::Disabled
        };
        Self { target }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    richtext_lint_core::config::user_data_local_dir()
        .map(|dir| dir.join("logs").into_std_path_buf())
}

/// Build the log filter. `RUST_LOG` wins over the flags, which win over
/// the configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    EnvFilter::new(filter_directive(
        quiet,
        verbose,
        config_level,
        rust_log.as_deref(),
    ))
}

fn filter_directive(quiet: bool, verbose: u8, config_level: &str, rust_log: Option<&str>) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive.to_string();
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    level.to_string()
}

/// Keeps the background log writer alive; drop it last.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let (writer, file_error) = match file_writer(&config.target) {
        Ok(writer) => (writer, None),
        Err(err) => (None, Some(err)),
    };
    let (file_layer, guard) = match writer {
        Some((writer, guard)) => (
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()
        .context("a global subscriber is already installed")?;

    if let Some(err) = file_error {
        tracing::warn!(error = %err, "file logging disabled");
    }
    Ok(ObservabilityGuard { _file: guard })
}

type FileWriter = (tracing_appender::non_blocking::NonBlocking, WorkerGuard);

fn file_writer(target: &LogTarget) -> anyhow::Result<Option<FileWriter>> {
    let appender = match target {
        LogTarget::Disabled => return Ok(None),
        LogTarget::File(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map_or_else(|| LOG_FILE_NAME.into(), |n| n.to_os_string());
            ensure_dir(dir)?;
            tracing_appender::rolling::never(dir, name)
        }
        LogTarget::Directory(dir) => {
            ensure_dir(dir)?;
            tracing_appender::rolling::daily(dir, LOG_FILE_NAME)
        }
    };
    Ok(Some(tracing_appender::non_blocking(appender)))
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}
