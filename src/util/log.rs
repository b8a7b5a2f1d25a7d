// src/util/log.rs

//! File-based logging for the terminal UI. Anything written to stdout would
//! corrupt the screen, so tracing output goes to a log file instead.
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

pub const LOG_FILE: &str = "support-widget.log";

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

fn debug_enabled(config_debug: bool) -> bool {
    *DEBUG_ENABLED.get_or_init(|| {
        config_debug || std::env::var("DEBUG").unwrap_or_default() == "true"
    })
}

/// Shared handle to the log file. `&File` implements `Write`, so every event borrows it.
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
    file: Arc<File>,
}

impl LogFile {
    /// Create (or truncate) the log file inside `log_dir`.
    pub fn create(log_dir: &Path) -> std::io::Result<Self> {
        create_dir_all(log_dir)?;
        let path = log_dir.join(LOG_FILE);
        let file = File::create(&path)?;
        Ok(Self { path, file: Arc::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.file
    }
}

/// Build the subscriber without installing it.
pub fn build_subscriber(
    log_file: LogFile,
    level: Level,
) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .finish()
}

/// Install the global subscriber. DEBUG=true or `debug` lowers the level to DEBUG.
pub fn init(log_dir: &str, debug: bool) -> color_eyre::Result<PathBuf> {
    let log_file = LogFile::create(Path::new(log_dir))?;
    let path = log_file.path().to_path_buf();
    let level = if debug_enabled(debug) { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(build_subscriber(log_file, level))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_events_land_in_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_file = LogFile::create(temp_dir.path()).expect("Failed to create log file");
        let path = log_file.path().to_path_buf();

        let subscriber = build_subscriber(log_file, Level::INFO);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("turn started");
            tracing::debug!("filtered out");
        });

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("turn started"));
        assert!(content.contains("INFO"));
        assert!(!content.contains("filtered out"));
    }
}
