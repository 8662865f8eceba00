// src/exec/backend.rs

//! Pluggable trigger sink abstraction.
//!
//! The listener hands accepted triggers to a `TriggerSink` instead of talking
//! to the runner directly. That gives two interchangeable ways of wiring the
//! pipeline:
//!
//! - an `mpsc::Sender<Trigger>`, read by [`CommandRunner::start`] in its own
//!   task (channel dispatch);
//! - the [`CommandRunner`] itself, called inline for every trigger (direct
//!   dispatch).
//!
//! Tests can provide their own sink that just records what it was given.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::errors::{FswatchError, Result};
use crate::types::Trigger;

use super::runner::CommandRunner;

/// Something that accepts triggers from the listener.
pub trait TriggerSink: Send {
    /// Hand over one trigger.
    ///
    /// The listener does not look at the next raw event until the returned
    /// future resolves. An error stops the listener.
    fn dispatch(
        &mut self,
        trigger: Trigger,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

impl TriggerSink for mpsc::Sender<Trigger> {
    fn dispatch(
        &mut self,
        trigger: Trigger,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.send(trigger).await.map_err(|_| FswatchError::SinkClosed) })
    }
}

impl TriggerSink for CommandRunner {
    fn dispatch(
        &mut self,
        trigger: Trigger,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.run(&trigger.path, &trigger.events).await })
    }
}
