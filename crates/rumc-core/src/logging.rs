//! Log setup: an append-only file under the XDG state dir, stderr otherwise.

use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config provide one. Covers the
/// library and the `rumc` binary.
pub const DEFAULT_FILTER: &str = "info,rumc_core=debug,rumc=debug";

/// Per-event sink. Falls back to stderr when the log file handle can't be cloned.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

fn env_filter(default_filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or(DEFAULT_FILTER)))
}

/// `$XDG_STATE_HOME/rumc/rumc.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rumc")?;
    Ok(xdg_dirs.get_state_home().join("rumc.log"))
}

fn open_log_file() -> Result<(File, PathBuf)> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Log to the state-dir file. Errors (unwritable dir, subscriber already set)
/// are returned so the caller can use [`init_logging_stderr`] instead.
pub fn init_logging(default_filter: Option<&str>) -> Result<()> {
    let (file, path) = open_log_file()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("rumc logging to {}", path.display());
    Ok(())
}

/// Log to stderr. A second call is a no-op.
pub fn init_logging_stderr(default_filter: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_under_state_dir() {
        let path = log_file_path().unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("rumc.log"));
        assert!(path.parent().unwrap().ends_with("rumc"));
    }

    #[test]
    fn default_filter_covers_library_and_binary() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        let targets: Vec<&str> = DEFAULT_FILTER.split(',').collect();
        assert!(targets.contains(&"rumc_core=debug"));
        assert!(targets.contains(&"rumc=debug"));
    }

    #[test]
    fn stderr_init_is_idempotent() {
        init_logging_stderr(Some("warn"));
        init_logging_stderr(None);
    }
}
