//! Logger facade used by command code.
use std::path::{Path, PathBuf};

use super::subscriber::STAGE_TARGET;
use super::utils::log_file_path;

/// Thin wrapper over [`tracing`] for command handlers.
///
/// Everything logged here also lands in the per-command log file at
/// `$XDG_CACHE_HOME/pyphot/<command>.log` (default
/// `~/.cache/pyphot/<command>.log`) once [`init_subscriber`] has run.
///
/// [`init_subscriber`]: super::init_subscriber
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

#[allow(clippy::unused_self)]
impl Logger {
    /// Create a logger for `command`.
    ///
    /// Only the log file path is resolved here; the file itself is created
    /// by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Path of the log file, if the cache directory is available.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Point the user at the log file.
    pub fn report_log_location(&self) {
        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use crate::logging::isolated_logger;
    use std::fs;

    #[test]
    fn log_file_is_created() {
        let (log, _tmp, _guard) = isolated_logger();
        let path = log.log_path().expect("log path should exist");
        assert!(path.exists(), "log file should exist once the layer is built");
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("pyphot-file"));
    }

    #[test]
    fn debug_always_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        let marker = format!("debug-marker-{}", std::process::id());
        log.debug(&marker);
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains("[debug]"));
        assert!(contents.contains(&marker));
    }

    #[test]
    fn warn_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.warn("duplicated files");
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains("[warn] duplicated files"));
    }

    #[test]
    fn info_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.info("camera: lbc_b");
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains("     camera: lbc_b"));
    }

    #[test]
    fn error_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.error("boom");
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains("[error] boom"));
    }

    #[test]
    fn stage_written_to_file_with_arrow() {
        let (log, _tmp, _guard) = isolated_logger();
        log.stage("Parsing run.pyphot");
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains("==> Parsing run.pyphot"));
    }

    #[test]
    fn library_events_reach_file() {
        let (log, _tmp, _guard) = isolated_logger();
        let parsed = crate::parse::parse_pyphot_str(
            "data read\n a.fits\n a.fits\ndata end\n",
            crate::parse::ParseOptions {
                file_check: false,
                runtime: false,
            },
        )
        .expect("parse");
        assert_eq!(parsed.data.files().len(), 1);
        let contents = fs::read_to_string(log.log_path().expect("log path")).unwrap();
        assert!(contents.contains("There are duplicated files"));
    }
}
