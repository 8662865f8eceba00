// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use notify::event::{EventKind, ModifyKind, RenameMode};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::{FswatchError, Result};
use crate::types::Op;

/// A single change on a single path, as seen by the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub op: Op,
}

impl WatchEvent {
    pub fn new(path: impl Into<PathBuf>, op: Op) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }
}

/// The two streams produced by a running watcher plus the handle that keeps
/// it alive.
#[derive(Debug)]
pub struct WatchSource {
    pub events: mpsc::UnboundedReceiver<WatchEvent>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
    pub handle: WatcherHandle,
}

/// Handle for the filesystem watcher.
///
/// Dropping the handle stops watching; [`WatcherHandle::close`] does the same
/// explicitly and may be called any number of times.
pub struct WatcherHandle {
    root: PathBuf,
    inner: Mutex<Option<RecommendedWatcher>>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl WatcherHandle {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stop watching. Only the first call does any work.
    pub fn close(&self) -> Result<()> {
        let watcher = match self.inner.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        let Some(mut watcher) = watcher else {
            debug!(root = ?self.root, "watcher already closed");
            return Ok(());
        };

        let res = watcher.unwatch(&self.root);
        drop(watcher);
        info!(root = ?self.root, "file watcher stopped");

        res.map_err(|source| FswatchError::Watch {
            path: self.root.display().to_string(),
            source,
        })
    }
}

/// Start watching `path` (non-recursively).
///
/// Change events and watcher errors are delivered on separate unbounded
/// channels so the listener can service them independently.
pub fn spawn_watcher(path: impl Into<PathBuf>) -> Result<WatchSource> {
    let root = path.into();
    let watch_err = |source: notify::Error| FswatchError::Watch {
        path: root.display().to_string(),
        source,
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel::<WatchEvent>();
    let (error_tx, error_rx) = mpsc::unbounded_channel::<notify::Error>();

    // Called synchronously on notify's own thread.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                // Access notifications and the like carry no operation we
                // know about.
                for watch_event in watch_events(&event).into_iter().filter(|e| !e.op.is_empty()) {
                    if event_tx.send(watch_event).is_err() {
                        // Listener is gone; nothing left to deliver to.
                        return;
                    }
                }
            }
            Err(err) => {
                let _ = error_tx.send(err);
            }
        },
        Config::default(),
    )
    .map_err(watch_err)?;

    watcher
        .watch(&root, RecursiveMode::NonRecursive)
        .map_err(watch_err)?;

    info!("file watcher started on {:?}", root);

    Ok(WatchSource {
        events: event_rx,
        errors: error_rx,
        handle: WatcherHandle {
            root,
            inner: Mutex::new(Some(watcher)),
        },
    })
}

/// Split a notify event into one [`WatchEvent`] per affected path.
pub fn watch_events(event: &Event) -> Vec<WatchEvent> {
    event
        .paths
        .iter()
        .map(|path| WatchEvent::new(path.clone(), op_for_kind(&event.kind)))
        .collect()
}

/// Map a notify event kind onto our operation set.
pub fn op_for_kind(kind: &EventKind) -> Op {
    match kind {
        EventKind::Create(_) => Op::CREATE,
        EventKind::Remove(_) => Op::REMOVE,
        EventKind::Modify(modify) => match modify {
            ModifyKind::Metadata(_) => Op::CHMOD,
            ModifyKind::Name(RenameMode::To) => Op::CREATE,
            // Follows the From and To halves already sent for the same rename.
            ModifyKind::Name(RenameMode::Both) => Op::EMPTY,
            ModifyKind::Name(_) => Op::RENAME,
            ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other => Op::WRITE,
        },
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Op::EMPTY,
    }
}
