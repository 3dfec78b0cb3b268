use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "bingo-caller.log";

/// Filter directive for this crate, everything else at warn.
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "bingo_caller=debug,warn"
    } else {
        "bingo_caller=info,warn"
    }
}

/// Installs the global tracing subscriber.
///
/// Console output goes to stderr so it does not interleave with the board
/// on stdout. With `log_dir`, a daily rotating file is added; keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter_directive(verbose)));
    let console = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        registry
            .with(console)
            .try_init()
            .context("Failed to install logger")?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log dir: {}", dir.display()))?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    registry
        .with(console)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to install logger")?;
    Ok(Some(guard))
}
