//! File watching for localized source files.

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebouncedEventKind, Debouncer, new_debouncer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;
use vernacular_core::logging::targets;

use crate::{Error, Result};

const TARGET: &str = targets::HOT_RELOAD;

/// A watched source file that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChange {
    /// Canonical path of the file.
    pub path: PathBuf,
    /// What happened to it.
    pub kind: ChangeKind,
    /// The new contents; `None` when the file is gone or unreadable.
    pub text: Option<String>,
}

/// Type of file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File was written.
    Modified,
    /// File was removed.
    Removed,
}

/// Watches localized source files and yields their new text.
///
/// # Example
///
/// ```ignore
/// let mut watcher = SourceWatcher::new(Duration::from_millis(100))?;
/// watcher.watch("styles/page.vss")?;
///
/// // In your event loop:
/// for change in watcher.poll() {
///     if let Some(text) = change.text {
///         coordinator.on_input(text, Instant::now());
///     }
/// }
/// ```
pub struct SourceWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<std::result::Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    watched_paths: HashSet<PathBuf>,
}

impl std::fmt::Debug for SourceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceWatcher")
            .field("watched_paths", &self.watched_paths)
            .finish_non_exhaustive()
    }
}

impl SourceWatcher {
    /// Create a watcher that coalesces file events within `debounce`.
    pub fn new(debounce: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let debouncer = new_debouncer(debounce, tx).map_err(|e| Error::HotReload(e.to_string()))?;

        Ok(Self {
            debouncer,
            rx,
            watched_paths: HashSet::new(),
        })
    }

    /// Start watching a source file.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path
            .as_ref()
            .canonicalize()
            .map_err(|e| Error::io(path.as_ref(), e))?;

        if !self.watched_paths.contains(&path) {
            self.debouncer
                .watcher()
                .watch(&path, RecursiveMode::NonRecursive)
                .map_err(|e| Error::HotReload(e.to_string()))?;

            tracing::info!(target: TARGET, "watching source: {}", path.display());
            self.watched_paths.insert(path);
        }

        Ok(())
    }

    /// Stop watching a source file.
    pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let Ok(path) = path.as_ref().canonicalize() else {
            return Ok(());
        };

        if self.watched_paths.remove(&path) {
            let _ = self.debouncer.watcher().unwatch(&path);
            tracing::info!(target: TARGET, "stopped watching source: {}", path.display());
        }

        Ok(())
    }

    /// Collect changes since the last poll, one per file.
    pub fn poll(&mut self) -> Vec<SourceChange> {
        let mut paths = Vec::new();

        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => {
                    paths.extend(
                        events
                            .into_iter()
                            .filter(|event| event.kind == DebouncedEventKind::Any)
                            .map(|event| event.path)
                            .filter(|path| self.watched_paths.contains(path)),
                    );
                }
                Ok(Err(e)) => {
                    tracing::warn!(target: TARGET, "file watcher error: {}", e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!(target: TARGET, "file watcher disconnected");
                    break;
                }
            }
        }

        paths.sort();
        paths.dedup();
        paths.into_iter().map(read_change).collect()
    }

    /// Get the number of watched files.
    pub fn watched_count(&self) -> usize {
        self.watched_paths.len()
    }

    /// Get the watched paths.
    pub fn watched_paths(&self) -> impl Iterator<Item = &Path> {
        self.watched_paths.iter().map(|p| p.as_path())
    }
}

fn read_change(path: PathBuf) -> SourceChange {
    if !path.exists() {
        tracing::info!(target: TARGET, "source removed: {}", path.display());
        return SourceChange {
            path,
            kind: ChangeKind::Removed,
            text: None,
        };
    }

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!(target: TARGET, "failed to read {}: {}", path.display(), e);
            None
        }
    };
    SourceChange {
        path,
        kind: ChangeKind::Modified,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::tempdir;

    fn watcher() -> SourceWatcher {
        SourceWatcher::new(Duration::from_millis(50)).unwrap()
    }

    #[test]
    fn watch_and_unwatch() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("page.vss");
        fs::write(&file_path, "页面 {\n颜色: 红色\n}").unwrap();

        let mut watcher = watcher();
        watcher.watch(&file_path).unwrap();
        watcher.watch(&file_path).unwrap();
        assert_eq!(watcher.watched_count(), 1);

        watcher.unwatch(&file_path).unwrap();
        assert_eq!(watcher.watched_count(), 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = watcher().watch(dir.path().join("absent.vss"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn read_change_reports_contents() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("page.vss");
        fs::write(&file_path, "卡片 {}").unwrap();

        let change = read_change(file_path.clone());
        assert_eq!(change.kind, ChangeKind::Modified);
        assert_eq!(change.text.as_deref(), Some("卡片 {}"));

        fs::remove_file(&file_path).unwrap();
        assert_eq!(read_change(file_path).kind, ChangeKind::Removed);
    }
}
