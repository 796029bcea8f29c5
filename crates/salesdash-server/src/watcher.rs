//! Dataset file watcher.
//!
//! The dataset is loaded once at startup. The watcher only reports when the
//! file changes or disappears underneath a running server, so operators know
//! a restart is needed to pick the change up.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};
use tokio::sync::mpsc;

use crate::error::{ServerError, ServerResult};

/// File change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// File was modified.
    Modified(PathBuf),
    /// File was removed.
    Removed(PathBuf),
}

/// Watcher for a single dataset file.
pub struct DatasetWatcher {
    /// Debouncer handle (kept alive to maintain watcher).
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
    /// Receiver for file events.
    rx: mpsc::UnboundedReceiver<FileEvent>,
}

impl DatasetWatcher {
    /// Watch `path`, which must be an existing file.
    pub fn new(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ServerError::Watch(format!(
                "{} is not a file",
                path.display()
            )));
        }
        let watch_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let target = path.file_name().map(|n| n.to_os_string());

        let mut debouncer = new_debouncer(
            Duration::from_millis(200),
            move |result: DebounceEventResult| {
                if let Ok(events) = result {
                    for event in events {
                        // Only report the dataset itself, not its neighbours
                        if event.path.file_name().map(|n| n.to_os_string()) != target {
                            continue;
                        }

                        let file_event = if event.path.exists() {
                            FileEvent::Modified(event.path.clone())
                        } else {
                            FileEvent::Removed(event.path.clone())
                        };

                        let _ = tx.send(file_event);
                    }
                }
            },
        )
        .map_err(|e| ServerError::Watch(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| ServerError::Watch(e.to_string()))?;

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Receive the next file event.
    pub async fn recv(&mut self) -> Option<FileEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_watcher_creation() {
        let temp = TempDir::new().unwrap();
        let dataset = temp.path().join("sales.csv");
        fs::write(&dataset, "Date,Total\n").unwrap();

        let watcher = DatasetWatcher::new(&dataset);
        assert!(watcher.is_ok());
    }

    #[tokio::test]
    async fn test_watcher_rejects_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = DatasetWatcher::new(temp.path().join("missing.csv"));
        assert!(matches!(result, Err(ServerError::Watch(_))));
    }
}
