//! Host integration
//!
//! Keeps a live form's error state current: a [`FieldWatcher`] polls the
//! participating fields, [`WatchLoop`] debounces the detected changes and
//! re-evaluates, and every report goes to a [`ReportSink`].

mod sink;
mod watch_loop;
mod watcher;

pub use sink::ReportSink;
pub use watch_loop::{watch, WatchLoop};
pub use watcher::FieldWatcher;
