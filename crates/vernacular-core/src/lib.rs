//! Core runtime pieces for Vernacular.
//!
//! This crate provides the small set of primitives the localized-stylesheet
//! pipeline is driven by:
//!
//! - **Timers**: One-shot and repeating timers keyed by [`TimerId`], driven by
//!   caller-supplied monotonic timestamps so debounce and idle windows are
//!   deterministic under test
//! - **Signal/Slot System**: Type-safe notification of produced events
//! - **Logging**: Target names for filtering `tracing` output per subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use vernacular_core::Signal;
//!
//! let canonical_changed = Signal::<String>::new();
//!
//! let conn_id = canonical_changed.connect(|css| {
//!     println!("stylesheet is now {} bytes", css.len());
//! });
//!
//! canonical_changed.emit("body { color: red; }".to_string());
//! canonical_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use vernacular_core::TimerManager;
//!
//! let mut timers = TimerManager::new();
//! let start = Instant::now();
//! let id = timers.start_one_shot(start, Duration::from_millis(300));
//!
//! assert!(timers.process_expired(start + Duration::from_millis(100)).is_empty());
//! assert_eq!(timers.process_expired(start + Duration::from_millis(300)), vec![id]);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{Result, TimerError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerKind, TimerManager};
