//! Error types for mp3-frames
//!
//! The analyzer core never fails on its own: malformed bytes are resynced
//! past and short buffers just wait for more input. The errors here come from
//! the surroundings (files, config, reports). Errors from an async byte
//! source are handed back to the caller unchanged and never wrapped.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML config
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Report serialization errors
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Convenience Result type using mp3-frames Error
pub type Result<T> = std::result::Result<T, Error>;
