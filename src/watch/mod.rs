// src/watch/mod.rs

//! File watching and event filtering.
//!
//! This module is responsible for:
//! - Wiring up a filesystem watcher (`notify`) that delivers change events
//!   and watch errors on two separate channels.
//! - Filtering events by operation kind.
//! - Turning accepted events into [`Trigger`](crate::types::Trigger)s for the
//!   command runner.
//!
//! It does **not** know how commands are run; it only hands triggers to a
//! [`TriggerSink`](crate::exec::TriggerSink).

pub mod filter;
pub mod listener;
pub mod watcher;

pub use filter::OpFilter;
pub use listener::Listener;
pub use watcher::{WatchEvent, WatchSource, WatcherHandle, op_for_kind, spawn_watcher, watch_events};
