use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use fswatch::errors::Result;
use fswatch::exec::TriggerSink;
use fswatch::types::Trigger;

/// A sink that records every trigger it is handed.
///
/// Optionally gated: each `dispatch` then waits for a permit released by
/// [`RecordingSink::release`], which lets tests simulate a slow consumer.
#[derive(Clone, Default)]
pub struct RecordingSink {
    received: Arc<Mutex<Vec<Trigger>>>,
    gate: Option<Arc<Semaphore>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose `dispatch` blocks until [`RecordingSink::release`] is
    /// called once per trigger.
    pub fn gated() -> Self {
        Self {
            received: Arc::default(),
            gate: Some(Arc::new(Semaphore::new(0))),
        }
    }

    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn received(&self) -> Vec<Trigger> {
        self.received.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.received().into_iter().map(|t| t.path).collect()
    }
}

impl TriggerSink for RecordingSink {
    fn dispatch(
        &mut self,
        trigger: Trigger,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let received = Arc::clone(&self.received);
        let gate = self.gate.clone();

        Box::pin(async move {
            if let Some(gate) = gate {
                gate.acquire().await.map_err(anyhow::Error::from)?.forget();
            }
            received.lock().unwrap().push(trigger);
            Ok(())
        })
    }
}
