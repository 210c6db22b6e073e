//! File logging for the game binary.
//!
//! Every `log` record goes to a single append-only file, one line per record:
//!
//! ```text
//! 2026-10-17T09:12:44Z         assets.rs:88      INFO Load image 'assets/images/flag_en.png'
//! ```
//!
//! `RUST_LOG` still overrides the configured level.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file '{path}': {source}")]
    Open { path: String, source: io::Error },
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
    #[error("a logger is already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

/// Opens `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn init_file_logger(path: &Path, level: &str) -> Result<(), LoggingError> {
    let level: log::LevelFilter = level
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))?;
    let file = open_log_file(path).map_err(|source| LoggingError::Open {
        path: path.display().to_string(),
        source,
    })?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            let file = record
                .file()
                .and_then(|f| Path::new(f).file_name())
                .and_then(|f| f.to_str())
                .unwrap_or("?");
            writeln!(
                buf,
                "{} {:>15}:{:<3} {:>8} {}",
                buf.timestamp_seconds(),
                file,
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .try_init()?;

    log::info!("Logging to '{}' at level {}", path.display(), level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "hop_log_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn open_log_file_creates_parent_directories() {
        let dir = temp_dir_path("parents");
        let path = dir.join("nested").join("game.log");
        let mut file = open_log_file(&path).expect("open log file");
        writeln!(file, "first").expect("write");
        assert!(path.exists());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn open_log_file_appends() {
        let dir = temp_dir_path("append");
        let path = dir.join("game.log");
        writeln!(open_log_file(&path).expect("open"), "one").expect("write");
        writeln!(open_log_file(&path).expect("reopen"), "two").expect("write");
        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "one\ntwo\n");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn init_rejects_unknown_level() {
        let dir = temp_dir_path("level");
        let err = init_file_logger(&dir.join("game.log"), "loud").expect_err("bad level");
        assert!(matches!(err, LoggingError::InvalidLevel(_)));
    }
}
