// src/config/mod.rs

//! Configuration loading and validation for fswatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate event names, durations and limits (`validate.rs`).
//! - Merge CLI flags over the file into the final [`Settings`]
//!   (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, RawConfigFile, RunnerSection, WatchSection};
pub use settings::{DEFAULT_COMMAND, Settings};
pub use validate::parse_duration;
