//! # Core Types
//!
//! Message and command values passed between the router, parser, and handlers.

use chrono::{DateTime, Utc};

/// A private message as delivered by the channel transport.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender: String,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(sender: String, body: String) -> Self {
        Self {
            sender,
            body,
            received_at: Utc::now(),
        }
    }
}

/// A validated command: lower-cased name plus arguments in their original case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// The ordered set of messages a handler produces for one command.
/// Each element is sent as a separate direct message; empty means silence.
pub type Reply = Vec<String>;
