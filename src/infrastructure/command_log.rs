use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only JSON-lines log of command outcomes. Write failures are ignored.
#[derive(Debug)]
pub struct CommandLog {
    path: Option<PathBuf>,
    guard: Mutex<()>,
}

impl CommandLog {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            guard: Mutex::new(()),
        }
    }

    pub fn disabled() -> Self {
        Self {
            path: None,
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, command: &str, message: &str) {
        self.append("info", command, message);
    }

    pub fn error(&self, command: &str, message: &str) {
        self.append("error", command, message);
    }

    fn append(&self, level: &str, command: &str, message: &str) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        let Ok(_guard) = self.guard.lock() else {
            return;
        };
        let payload = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "command": command,
            "message": message,
        });

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{}", payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn entries_are_appended_as_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "timeinput-command-log-{}.log",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        let log = CommandLog::to_file(&path);

        log.info("resolve_config", "step=900");
        log.error("resolve_config", "min has to be a valid time string");

        let raw = fs::read_to_string(&path).expect("read log");
        let entries: Vec<serde_json::Value> = raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["level"], "info");
        assert_eq!(entries[1]["level"], "error");
        assert_eq!(entries[1]["command"], "resolve_config");
        assert!(entries[0]["timestamp"].as_str().is_some());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = CommandLog::disabled();
        log.error("snap", "ignored");
        assert!(log.path().is_none());
    }
}
