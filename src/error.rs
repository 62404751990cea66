//! Error types shared across the bench.
//!
//! None of these are fatal. Graph and instrument errors are reported to the
//! caller, transport errors are absorbed by the modulation engine's local
//! fallback, and configuration errors only surface at startup.

use thiserror::Error;

/// Errors raised by graph editing and instrument front panels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    #[error("no node with id `{0}`")]
    UnknownNode(String),
    #[error("a node with id `{0}` already exists")]
    DuplicateNode(String),
    #[error("node `{0}` is not a modulator")]
    NotAModulator(String),
    #[error("please enter exactly 8 bits (0s and 1s), got {len}")]
    BitLength { len: usize },
}

/// Failures talking to the remote modulation service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("modulation service answered with status {0}")]
    Status(u16),
    #[error("modulation request failed: {0}")]
    Io(String),
    #[error("could not decode modulation response: {0}")]
    Decode(String),
    #[error("modulation response has the wrong shape: {0}")]
    Shape(String),
    #[error("modulation service disabled (offline mode)")]
    Offline,
}

/// Failures loading a [`crate::config::BenchConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
