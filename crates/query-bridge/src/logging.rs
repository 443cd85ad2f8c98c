use crate::{BridgeError, LogConfig, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

static LOG_FILE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// One file per run: `address-search-field-<YYYYmmdd-HHMMSS>.log`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("address-search-field-{timestamp}.log"))
}

/// Installs the global subscriber. Later calls are no-ops and return the
/// path chosen by the first one.
///
/// When the embedding host already installed a subscriber, nothing is
/// mirrored to a file and `None` is returned.
pub fn init_logging(config: &LogConfig) -> Result<Option<PathBuf>> {
    if let Some(path) = LOG_FILE_PATH.get() {
        return Ok(path.clone());
    }

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| BridgeError::Config(format!("invalid log filter {:?}: {e}", config.filter)))?;

    let (writer, path) = match &config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path = log_file_path(dir);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            (
                BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file))),
                Some(path),
            )
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(path.is_none())
        .try_init();

    let path = match (installed, path) {
        (Ok(()), Some(path)) => {
            eprintln!("📝 Log file: {}", path.display());
            Some(path)
        }
        (Ok(()), None) => None,
        (Err(e), path) => {
            if let Some(path) = path {
                let _ = fs::remove_file(&path);
            }
            warn!("Global subscriber already installed, not mirroring logs to a file: {e}");
            None
        }
    };

    Ok(LOG_FILE_PATH.get_or_init(|| path).clone())
}

pub fn log_session_start(channel: &str) {
    let separator = "=".repeat(80);
    info!("\n{separator}\nSESSION START channel={channel}\n{separator}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name_carries_timestamp() {
        let path = log_file_path(Path::new("/var/log/bridge"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("address-search-field-"));
        assert!(name.ends_with(".log"));
        // address-search-field- + YYYYmmdd-HHMMSS + .log
        assert_eq!(name.len(), "address-search-field-".len() + 15 + ".log".len());
        assert_eq!(path.parent(), Some(Path::new("/var/log/bridge")));
    }

    #[test]
    fn existing_subscriber_leaves_no_log_file() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let dir = std::env::temp_dir().join(format!("query-bridge-logs-{}", uuid::Uuid::new_v4()));
        let path = init_logging(&LogConfig {
            filter: "info".to_string(),
            log_dir: Some(dir.clone()),
        })
        .unwrap();

        assert!(path.is_none());
        let leftovers = fs::read_dir(&dir).map(|entries| entries.count()).unwrap_or(0);
        assert_eq!(leftovers, 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn second_init_is_a_no_op() {
        let first = init_logging(&LogConfig::default()).unwrap();
        let second = init_logging(&LogConfig {
            filter: "debug".to_string(),
            log_dir: Some(PathBuf::from("/nonexistent/never-created")),
        })
        .unwrap();
        assert_eq!(first, second);
        assert!(second.is_none());
    }
}
