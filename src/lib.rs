// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;
pub mod watch;

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{Settings, load_and_validate};
use crate::errors::{FswatchError, Result};
use crate::exec::CommandRunner;
use crate::types::DispatchMode;
use crate::watch::{Listener, WatchSource, spawn_watcher};

/// High-level entry point used by `main.rs`.
///
/// Loads the optional config file, merges the CLI flags over it and runs the
/// pipeline until a signal arrives.
pub async fn run(args: CliArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => Some(load_and_validate(path)?),
        None => None,
    };
    let settings = Settings::resolve(&args, file)?;
    run_with_settings(settings, CancellationToken::new()).await
}

/// Run the watch pipeline.
///
/// This wires together:
/// - the file watcher
/// - the listener (event filter)
/// - the command runner
/// - SIGINT / SIGTERM handling
///
/// Everything shares `cancel`: the first component to stop (or fail)
/// cancels it and the others follow. Returns the first error, with a
/// received signal taking precedence.
pub async fn run_with_settings(settings: Settings, cancel: CancellationToken) -> Result<()> {
    let mut listener = Listener::new(&settings.events)?;
    let WatchSource {
        mut events,
        mut errors,
        handle,
    } = spawn_watcher(&settings.path)?;
    let mut runner = CommandRunner::new(settings.command.clone(), cancel.clone(), settings.runner);

    info!(
        path = ?settings.path,
        events = ?settings.events,
        command = %settings.command,
        dispatch = ?settings.dispatch,
        "fswatch started"
    );

    let signals = listen_for_signals(cancel.clone());

    let closer = async {
        cancel.cancelled().await;
        handle.close().inspect_err(|err| {
            warn!(error = %err, "failed to stop watcher");
        })
    };

    let pipeline = async {
        match settings.dispatch {
            DispatchMode::Channel => {
                let Some(triggers) = listener.subscribe() else {
                    return Err(FswatchError::Other(anyhow::anyhow!(
                        "listener channel already taken"
                    )));
                };
                let (listened, ran) = tokio::join!(
                    cancel_on_exit(&cancel, listener.listen(&cancel, &mut events, &mut errors)),
                    cancel_on_exit(&cancel, runner.start(triggers)),
                );
                listened.and(ran)
            }
            DispatchMode::Direct => {
                let listened = cancel_on_exit(
                    &cancel,
                    listener.listen_into(&cancel, &mut events, &mut errors, &mut runner),
                )
                .await;
                runner.wait().await;
                listened
            }
        }
    };

    let (signalled, closed, finished) = tokio::join!(signals, closer, pipeline);
    info!("fswatch stopped");
    signalled.and(finished).and(closed)
}

/// Await `fut`, then cancel `cancel` whatever the outcome.
async fn cancel_on_exit<F>(cancel: &CancellationToken, fut: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let res = fut.await;
    cancel.cancel();
    res
}

/// Wait for SIGINT / SIGTERM and cancel `cancel` when one arrives.
///
/// Returns [`FswatchError::Signal`] if a signal caused the shutdown and
/// `Ok(())` if something else cancelled first.
pub async fn listen_for_signals(cancel: CancellationToken) -> Result<()> {
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                warn!(error = %e, "failed to listen for Ctrl+C");
                cancel.cancelled().await;
                return Ok(());
            }
        }
        _ = terminate() => {}
        _ = cancel.cancelled() => return Ok(()),
    }

    info!("signal received; shutting down");
    cancel.cancel();
    Err(FswatchError::Signal)
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "failed to listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
