// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the user's command for
//! every trigger, using `tokio::process::Command`.
//!
//! - [`command`] renders the command template and splits the result into a
//!   program plus arguments.
//! - [`runner`] owns the concurrent runner: concurrency limit, per-command
//!   timeout, cancellation and draining on shutdown.
//! - [`backend`] provides the `TriggerSink` trait the listener dispatches
//!   into, with implementations for a channel sender and for the runner
//!   itself.

pub mod backend;
pub mod command;
pub mod runner;

pub use backend::TriggerSink;
pub use command::{CommandLine, EVENTS_PLACEHOLDER, PATH_PLACEHOLDER, render, split_command};
pub use runner::{CommandRunner, RunnerOptions};
