//! File-backed `log` sink.
//!
//! Lines look like `[2024-05-01 13:37:00] INFO search start: ...`. Write
//! failures are dropped silently so logging never disturbs the engine.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const DEFAULT_LOG_FILE: &str = "magic_chess.log";

pub struct FileLogger {
    path: PathBuf,
    level: LevelFilter,
    file: Mutex<Option<File>>,
}

impl FileLogger {
    /// The file is opened lazily on the first record.
    pub fn new(path: impl AsRef<Path>, level: LevelFilter) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            level,
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Option<File> {
        OpenOptions::new().create(true).append(true).open(&self.path).ok()
    }
}

pub fn format_line(record: &Record) -> String {
    format!(
        "[{}] {} {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.args()
    )
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let Ok(mut guard) = self.file.lock() else {
            return;
        };
        if guard.is_none() {
            *guard = self.open();
        }
        if let Some(file) = guard.as_mut() {
            let _ = writeln!(file, "{}", format_line(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Install a `FileLogger` as the global logger. Fails if one is already set.
pub fn init(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(FileLogger::new(path, level)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use std::fs;

    fn temp_log(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("magic_chess_{}_{}.log", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    fn emit(logger: &FileLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn appends_timestamped_lines() {
        let path = temp_log("append");
        let logger = FileLogger::new(&path, LevelFilter::Debug);

        emit(&logger, Level::Info, "first");
        emit(&logger, Level::Debug, "second");
        logger.flush();

        let text = fs::read_to_string(&path).expect("log file should exist");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] INFO first"));
        assert!(lines[1].ends_with("] DEBUG second"));
        // "[YYYY-mm-dd HH:MM:SS]"
        assert_eq!(lines[0].find(']'), Some(20));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn filters_below_level() {
        let path = temp_log("filter");
        let logger = FileLogger::new(&path, LevelFilter::Info);

        emit(&logger, Level::Debug, "hidden");
        emit(&logger, Level::Warn, "shown");
        logger.flush();

        let text = fs::read_to_string(&path).expect("log file should exist");
        assert!(!text.contains("hidden"));
        assert!(text.contains("WARN shown"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn init_installs_global_logger_once() {
        let path = temp_log("global");

        init(&path, LevelFilter::Info).expect("first install should succeed");
        assert!(init(&path, LevelFilter::Info).is_err());

        log::info!("installed");
        log::logger().flush();

        let text = fs::read_to_string(&path).expect("log file should exist");
        assert!(text.lines().any(|line| line.ends_with("] INFO installed")));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unwritable_path_is_ignored() {
        let logger = FileLogger::new("/nonexistent-dir/for/sure/magic.log", LevelFilter::Trace);
        emit(&logger, Level::Error, "dropped");
        logger.flush();
        assert!(!logger.path().exists());
    }
}
