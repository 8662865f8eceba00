// src/watch/listener.rs

//! Turns raw watch events into triggers.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::TriggerSink;
use crate::types::Trigger;
use crate::watch::filter::OpFilter;
use crate::watch::watcher::WatchEvent;

/// Capacity of the listener's own trigger channel. One slot keeps the
/// hand-off a rendezvous: the listener stays at most one trigger ahead of
/// the consumer.
const TRIGGER_CHANNEL_CAPACITY: usize = 1;

/// Listens for operation events coming from a watch source.
#[derive(Debug)]
pub struct Listener {
    filter: OpFilter,
    output: mpsc::Sender<Trigger>,
    receiver: Option<mpsc::Receiver<Trigger>>,
}

impl Listener {
    /// Create a listener that responds to the given operation kinds.
    ///
    /// An empty list accepts every event.
    pub fn new<S: AsRef<str>>(events: &[S]) -> Result<Self> {
        Ok(Self::with_filter(OpFilter::new(events)?))
    }

    pub fn with_filter(filter: OpFilter) -> Self {
        let (output, receiver) = mpsc::channel(TRIGGER_CHANNEL_CAPACITY);
        Self {
            filter,
            output,
            receiver: Some(receiver),
        }
    }

    pub fn filter(&self) -> &OpFilter {
        &self.filter
    }

    /// Take the receiving end of the listener's trigger channel.
    ///
    /// Only the first call returns `Some`.
    pub fn subscribe(&mut self) -> Option<mpsc::Receiver<Trigger>> {
        self.receiver.take()
    }

    /// Apply the filter to one raw event.
    pub fn accept(&self, event: &WatchEvent) -> Option<Trigger> {
        if !self.filter.pass(event.op) {
            debug!(op = %event.op, path = ?event.path, "skipping event");
            return None;
        }
        info!(op = %event.op, path = ?event.path, "received event");
        Some(Trigger::from_op(
            event.path.to_string_lossy().into_owned(),
            event.op,
        ))
    }

    /// Process the event and error streams, sending accepted triggers into
    /// the listener's own channel (see [`Listener::subscribe`]).
    pub async fn listen(
        &self,
        cancel: &CancellationToken,
        events: &mut mpsc::UnboundedReceiver<WatchEvent>,
        errors: &mut mpsc::UnboundedReceiver<notify::Error>,
    ) -> Result<()> {
        let mut output = self.output.clone();
        self.listen_into(cancel, events, errors, &mut output).await
    }

    /// Process the event and error streams, handing accepted triggers to
    /// `sink`.
    ///
    /// Returns `Ok(())` on cancellation or when the event stream ends. Watch
    /// errors are logged and otherwise ignored.
    pub async fn listen_into<S>(
        &self,
        cancel: &CancellationToken,
        events: &mut mpsc::UnboundedReceiver<WatchEvent>,
        errors: &mut mpsc::UnboundedReceiver<notify::Error>,
        sink: &mut S,
    ) -> Result<()>
    where
        S: TriggerSink + ?Sized,
    {
        info!(filter = ?self.filter, "listener started");
        let mut errors_open = true;

        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    let Some(event) = maybe_event else {
                        info!("watch event stream closed; listener exiting");
                        return Ok(());
                    };
                    let Some(trigger) = self.accept(&event) else {
                        continue;
                    };
                    tokio::select! {
                        res = sink.dispatch(trigger) => res?,
                        _ = cancel.cancelled() => {
                            debug!("cancelled while handing off trigger");
                            return Ok(());
                        }
                    }
                }
                maybe_err = errors.recv(), if errors_open => {
                    match maybe_err {
                        Some(err) => warn!(error = %err, "watch error"),
                        None => {
                            debug!("watch error stream closed");
                            errors_open = false;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("listener cancelled");
                    return Ok(());
                }
            }
        }
    }
}
