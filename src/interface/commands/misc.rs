//! # Miscellaneous Commands
//!
//! `time` (local informational query) and `exec` (permanently disabled).

use crate::application::registry::{Command, CommandContext};
use crate::domain::types::Reply;
use crate::strings::messages;
use async_trait::async_trait;
use chrono::Local;

/// Reports the local time, ctime-style.
pub struct Time;

#[async_trait]
impl Command for Time {
    async fn run(&self, _ctx: &CommandContext, _args: &[String], _caller: &str) -> Reply {
        vec![format!(
            "It's {}",
            Local::now().format("%a %b %e %H:%M:%S %Y")
        )]
    }
}

/// Always refuses. Arguments never reach the process runner; this command
/// exists to answer, not to execute.
pub struct Exec;

#[async_trait]
impl Command for Exec {
    async fn run(&self, _ctx: &CommandContext, _args: &[String], _caller: &str) -> Reply {
        vec![messages::EXEC_DISABLED.to_string()]
    }
}
