use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

const LOG_FILE_NAME: &str = "chrome-profiles.log";
const ARCHIVE_PREFIX: &str = "chrome-profiles-";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;

static LOGGER: OnceLock<FileLogger> = OnceLock::new();
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

// stdout belongs to the host protocol, so everything goes to this file.
struct FileLogger {
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        let line = format!("[{}] [{}] {}\n", now_secs(), record.level(), record.args());
        let _ = file.write_all(line.as_bytes());
        let _ = file.flush();
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

pub fn logs_dir() -> PathBuf {
    crate::config::stable_app_data_dir().join("logs")
}

pub fn init() -> Result<(), std::io::Error> {
    init_in(&logs_dir(), LevelFilter::Info)
}

pub fn init_in(log_dir: &Path, level: LevelFilter) -> Result<(), std::io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    rotate_if_needed(&log_path, log_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let logger = LOGGER.get_or_init(|| FileLogger {
        file: Mutex::new(file),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }

    install_panic_hook();
    Ok(())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn rotate_if_needed(log_path: &Path, log_dir: &Path) -> Result<(), std::io::Error> {
    let meta = match fs::metadata(log_path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    if meta.len() < MAX_LOG_BYTES {
        return Ok(());
    }

    let archived = log_dir.join(format!("{ARCHIVE_PREFIX}{}.log", now_secs()));
    fs::rename(log_path, archived)?;
    prune_old_archives(log_dir)
}

fn prune_old_archives(log_dir: &Path) -> Result<(), std::io::Error> {
    let mut archives = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(ARCHIVE_PREFIX) && n.ends_with(".log"))
        })
        .collect::<Vec<_>>();

    archives.sort();
    let excess = archives.len().saturating_sub(MAX_ARCHIVES);
    for oldest in archives.drain(..excess) {
        let _ = fs::remove_file(oldest);
    }
    Ok(())
}

fn install_panic_hook() {
    let _ = PANIC_HOOK_INSTALLED.get_or_init(|| {
        let prior = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload unavailable".to_string());
            log::error!("panic at {location}: {payload}");
            prior(panic_info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::{logs_dir, prune_old_archives, rotate_if_needed, LOG_FILE_NAME};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn logs_dir_uses_stable_app_data_layout() {
        assert!(logs_dir().to_string_lossy().contains("chrome-profiles"));
    }

    #[test]
    fn small_log_is_not_rotated() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("chrome-profiles-log-small-{unique}"));
        std::fs::create_dir_all(&dir).unwrap();
        let log_path = dir.join(LOG_FILE_NAME);
        std::fs::write(&log_path, b"short").unwrap();

        rotate_if_needed(&log_path, &dir).unwrap();
        assert!(log_path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn pruning_keeps_newest_archives() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("chrome-profiles-log-prune-{unique}"));
        std::fs::create_dir_all(&dir).unwrap();
        for stamp in 1..=7 {
            std::fs::write(dir.join(format!("chrome-profiles-{stamp}.log")), b"x").unwrap();
        }

        prune_old_archives(&dir).unwrap();

        assert!(!dir.join("chrome-profiles-1.log").exists());
        assert!(!dir.join("chrome-profiles-2.log").exists());
        assert!(dir.join("chrome-profiles-3.log").exists());
        assert!(dir.join("chrome-profiles-7.log").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
