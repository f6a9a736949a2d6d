use crate::history::History;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};

/// Fixed file name for the persisted history, the single key this store holds.
pub const HISTORY_FILE: &str = "weather_history.json";

/// Flat-file persistence for [`History`].
///
/// Failures on either side of the boundary are recoverable by design: a
/// missing or corrupt file loads as an empty history, and a failed save is
/// logged and dropped while the in-memory state stays authoritative.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(HISTORY_FILE),
        }
    }

    pub fn load(&self) -> History {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No stored history, starting empty");
                return History::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read stored history, starting empty");
                return History::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(history) => history,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Stored history is unparseable, starting empty");
                History::default()
            }
        }
    }

    pub fn save(&self, history: &History) {
        let serialized = match serde_json::to_string(history) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!(error = %e, "Failed to serialize history, keeping in-memory state");
                return;
            }
        };

        // Write-then-rename so a crash mid-save cannot leave a truncated
        // file that would load as empty and drop the day's history.
        let tmp = self.path.with_extension("json.tmp");
        let written = fs::write(&tmp, serialized).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            warn!(path = %self.path.display(), error = %e, "Failed to persist history, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::merge;
    use chrono::{Local, TimeZone};
    use common::models::Reading;

    fn temp_store(label: &str) -> HistoryStore {
        let dir = std::env::temp_dir().join(format!(
            "dashboard-store-{}-{}",
            label,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        HistoryStore::new(dir)
    }

    #[test]
    fn load_returns_empty_when_file_is_absent() {
        let store = temp_store("absent");

        assert_eq!(store.load(), History::default());
    }

    #[test]
    fn load_recovers_from_a_corrupt_file() {
        let store = temp_store("corrupt");
        fs::write(&store.path, "{not json").unwrap();

        assert_eq!(store.load(), History::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        let now = Local.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let history = merge(
            &History::default(),
            &[Reading {
                city: "Chennai".to_string(),
                condition: "Clear".to_string(),
                temperature: 28.0,
                feels_like: 29.1,
                timestamp: now.timestamp(),
            }],
            now,
        );

        store.save(&history);

        assert_eq!(store.load(), history);
    }

    #[test]
    fn save_replaces_prior_state_and_leaves_no_temp_file() {
        let store = temp_store("replace");
        fs::write(&store.path, "{truncated by a crash").unwrap();

        let now = Local.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let history = merge(
            &History::default(),
            &[Reading {
                city: "Mumbai".to_string(),
                condition: "Haze".to_string(),
                temperature: 29.0,
                feels_like: 32.1,
                timestamp: now.timestamp(),
            }],
            now,
        );

        store.save(&history);

        assert_eq!(store.load(), history);
        assert!(!store.path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_failure_does_not_panic() {
        let store = HistoryStore::new("/nonexistent/dir/for/history");

        store.save(&History::default());
    }
}
