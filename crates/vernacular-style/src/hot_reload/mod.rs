//! Recompile localized source files when they change on disk.
//!
//! This module is only available with the `hot-reload` feature.

mod watcher;

pub use watcher::{ChangeKind, SourceChange, SourceWatcher};
