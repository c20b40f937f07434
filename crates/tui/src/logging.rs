use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// Send tracing output to `log_path`. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr.
///
/// `RUST_LOG` takes precedence over `filter`. The returned guard flushes
/// buffered lines on drop and must live until shutdown.
pub fn init(log_path: &Path, filter: Option<&str>) -> Result<WorkerGuard> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow!("log path {} has no parent directory", log_path.display()))?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("log path {} has no file name", log_path.display()))?;

    let directive = parse_directive(filter)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(guard)
}

fn parse_directive(filter: Option<&str>) -> Result<Directive> {
    let raw = filter.unwrap_or(DEFAULT_DIRECTIVE);
    raw.parse()
        .with_context(|| format!("invalid --log directive '{raw}'"))
}
