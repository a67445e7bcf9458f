//! # Kill Command
//!
//! Graceful shutdown. The confirmation goes out through the guard directly,
//! since the normal return path would never run once the driver stops.

use crate::application::registry::{Command, CommandContext};
use crate::domain::types::Reply;
use crate::strings::messages;
use async_trait::async_trait;

pub struct Kill;

#[async_trait]
impl Command for Kill {
    async fn run(&self, ctx: &CommandContext, _args: &[String], caller: &str) -> Reply {
        if let Err(e) = ctx.guard.send(messages::KILL_CONFIRM, Some(caller)).await {
            tracing::warn!("kill confirmation delivery failed: {}", e);
        }
        let _ = ctx.shutdown.send(true);
        Reply::new()
    }

    fn operator_only(&self) -> bool {
        true
    }
}
