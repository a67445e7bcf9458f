//! # Help Command
//!
//! Lists the registered command names, comma-separated, in one reply.

use crate::application::registry::{Command, CommandContext};
use crate::domain::types::Reply;
use async_trait::async_trait;

pub struct Help;

#[async_trait]
impl Command for Help {
    async fn run(&self, ctx: &CommandContext, _args: &[String], _caller: &str) -> Reply {
        vec![format!(
            "Available commands: {}",
            ctx.command_names.join(", ")
        )]
    }
}
