//! # Todo Command
//!
//! Pass-through delegate: forwards the arguments verbatim to the local
//! `todo` utility and relays its output, one reply line per output line.

use crate::application::registry::{Command, CommandContext};
use crate::domain::types::Reply;
use crate::strings::messages;
use async_trait::async_trait;

pub struct Todo;

#[async_trait]
impl Command for Todo {
    async fn run(&self, ctx: &CommandContext, args: &[String], _caller: &str) -> Reply {
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        match ctx.procs.run_sync("todo", &argv).await {
            Ok(out) => out.lines().map(str::to_string).collect(),
            Err(e) => vec![messages::delegate_failed("todo", &e.to_string())],
        }
    }

    fn operator_only(&self) -> bool {
        true
    }
}
