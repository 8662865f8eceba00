use std::path::PathBuf;

use tokio::sync::mpsc;
use fswatch::types::Op;
use fswatch::watch::WatchEvent;

/// In-memory stand-in for a watch source.
///
/// Tests push raw events and errors through the feed and hand the
/// receivers to the listener.
pub struct WatchFeed {
    events: Option<mpsc::UnboundedSender<WatchEvent>>,
    errors: Option<mpsc::UnboundedSender<notify::Error>>,
}

pub type EventRx = mpsc::UnboundedReceiver<WatchEvent>;
pub type ErrorRx = mpsc::UnboundedReceiver<notify::Error>;

impl WatchFeed {
    pub fn new() -> (Self, EventRx, ErrorRx) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        (
            Self {
                events: Some(events_tx),
                errors: Some(errors_tx),
            },
            events_rx,
            errors_rx,
        )
    }

    pub fn event(&self, path: impl Into<PathBuf>, op: Op) {
        if let Some(tx) = &self.events {
            tx.send(WatchEvent::new(path, op)).expect("listener dropped its event stream");
        }
    }

    pub fn error(&self, msg: &str) {
        if let Some(tx) = &self.errors {
            tx.send(notify::Error::generic(msg)).expect("listener dropped its error stream");
        }
    }

    /// Close the event stream, as a watcher does when it is stopped.
    pub fn close_events(&mut self) {
        self.events.take();
    }

    pub fn close_errors(&mut self) {
        self.errors.take();
    }
}
