//! # Notification Commands
//!
//! `alert` (on-screen flash) and `say` (text-to-speech). Both are
//! side-effect-only: the utility is launched detached and nothing is sent
//! back; failures are logged and swallowed.

use crate::application::registry::{Command, CommandContext};
use crate::domain::types::Reply;
use async_trait::async_trait;

fn dispatch(ctx: &CommandContext, program: &str, args: &[String]) {
    let message = args.join(" ");
    if let Err(e) = ctx.procs.spawn_detached(program, &[message.as_str()]) {
        tracing::warn!("{} dispatch failed: {}", program, e);
    }
}

/// Flashes the argument text on the local screen.
pub struct Alert;

#[async_trait]
impl Command for Alert {
    async fn run(&self, ctx: &CommandContext, args: &[String], _caller: &str) -> Reply {
        dispatch(ctx, "alert", args);
        Reply::new()
    }

    fn operator_only(&self) -> bool {
        true
    }
}

/// Speaks the argument text out loud.
pub struct Say;

#[async_trait]
impl Command for Say {
    async fn run(&self, ctx: &CommandContext, args: &[String], _caller: &str) -> Reply {
        dispatch(ctx, "say", args);
        Reply::new()
    }

    fn operator_only(&self) -> bool {
        true
    }
}
