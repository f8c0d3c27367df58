pub use crate::communities::{
    Approval, Community, CommunityBuilder, CommunityCoordinate, CommunityPost, ParseWarning,
    Parsed, PostParent, is_community_post,
};
pub use crate::config::{ParseConfig, Tolerance};
pub use crate::error::{CommunityError, Result};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt::Layer, prelude::*, registry::Registry};

use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub mod communities;
mod config;
mod error;
pub mod tags;

/// Worker guards of the installed subscriber. `Some` once logging is set up.
static TRACING_GUARDS: OnceLock<Mutex<Option<(WorkerGuard, WorkerGuard)>>> = OnceLock::new();

/// Installs the global tracing subscriber.
///
/// Logs go to stdout and to a daily rolling file in `logs_dir`. The filter is
/// read from `RUST_LOG` and defaults to `info`. Calling this more than once is
/// a no-op.
///
/// # Errors
///
/// Returns [`CommunityError::LoggingSetup`] if the log directory or file
/// appender cannot be created, or if another global subscriber is already set.
pub fn init_tracing(logs_dir: &Path) -> Result<()> {
    let mut guards = TRACING_GUARDS
        .get_or_init(|| Mutex::new(None))
        .lock()
        .map_err(|e| CommunityError::LoggingSetup(e.to_string()))?;
    if guards.is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(logs_dir).map_err(|e| {
        CommunityError::LoggingSetup(format!(
            "Failed to create logs directory {:?}: {}",
            logs_dir, e
        ))
    })?;

    let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("nostr-communities")
        .filename_suffix("log")
        .build(logs_dir)
        .map_err(|e| CommunityError::LoggingSetup(e.to_string()))?;

    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
    let (non_blocking_stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());

    let stdout_layer = Layer::new()
        .with_writer(non_blocking_stdout)
        .with_ansi(true)
        .with_target(true);

    let file_layer = Layer::new()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CommunityError::LoggingSetup(e.to_string()))?;

    *guards = Some((file_guard, stdout_guard));

    tracing::debug!(
        target: "nostr_communities::init_tracing",
        "Logging initialized in directory: {:?}",
        logs_dir
    );
    Ok(())
}
