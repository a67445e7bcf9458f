//! # Error Types
//!
//! The failure taxonomy of the bot. Parse and lookup failures are dropped
//! silently by the router; process failures become reply text at the handler
//! boundary; delivery failures are logged without poisoning the dedup state.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty message")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command already registered: {0}")]
    Duplicate(String),
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("argument rejected (shell metacharacter): {0:?}")]
    Rejected(String),

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exceeded the {}s time limit", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("channel rejected message: {0}")]
    Rejected(String),
}
