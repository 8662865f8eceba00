// src/errors.rs

//! Crate-wide error type and `Result` alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FswatchError {
    #[error("unknown event type {0:?}")]
    UnknownEventType(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("invalid duration {0:?}: {1}")]
    InvalidDuration(String, String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("failed to monitor path {path:?}: {source}")]
    Watch {
        path: String,
        #[source]
        source: notify::Error,
    },

    #[error("trigger consumer is gone")]
    SinkClosed,

    #[error("signal received")]
    Signal,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FswatchError {
    /// Process exit code for this error.
    ///
    /// Anything that prevents the pipeline from being set up is a usage
    /// problem (2); anything that ends a running session is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            FswatchError::UnknownEventType(_)
            | FswatchError::ConfigError(_)
            | FswatchError::InvalidDuration(..)
            | FswatchError::TomlError(_)
            | FswatchError::Watch { .. } => 2,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FswatchError>;
