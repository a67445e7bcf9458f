//! # System Commands
//!
//! Package management. `update` synchronizes the package databases in the
//! background and reports the pending-upgrade count later via a direct send;
//! `upgrade` is a deliberate stub until unattended upgrades are trusted.
//!
//! Passwordless sudo must be enabled for pacman.

use crate::application::registry::{Command, CommandContext};
use crate::domain::types::Reply;
use crate::infrastructure::process::ProcessRunner;
use crate::strings::messages;
use async_trait::async_trait;
use std::sync::Arc;

pub struct Update;

#[async_trait]
impl Command for Update {
    async fn run(&self, ctx: &CommandContext, _args: &[String], caller: &str) -> Reply {
        let procs = ctx.procs.clone();
        let guard = ctx.guard.clone();
        let recipient = caller.to_string();

        // The sync takes minutes; the result arrives as its own DM so the
        // intake path is never held up.
        tokio::spawn(async move {
            let line = match sync_and_count(&procs).await {
                Ok(count) => messages::pending_upgrades(count),
                Err(e) => messages::update_failed(&e),
            };
            if let Err(e) = guard.send(&line, Some(&recipient)).await {
                tracing::warn!("update report delivery failed: {}", e);
            }
        });

        vec![messages::UPDATE_ACK.to_string()]
    }

    fn operator_only(&self) -> bool {
        true
    }
}

async fn sync_and_count(procs: &Arc<ProcessRunner>) -> Result<usize, String> {
    procs
        .run_sync("sudo", &["pacman", "-Sy"])
        .await
        .map_err(|e| e.to_string())?;

    // `pacman -Sup` prints one header line before the package URLs.
    let out = procs
        .run_sync("pacman", &["-Sup"])
        .await
        .map_err(|e| e.to_string())?;
    Ok(out.lines().count().saturating_sub(1))
}

pub struct Upgrade;

#[async_trait]
impl Command for Upgrade {
    async fn run(&self, _ctx: &CommandContext, _args: &[String], _caller: &str) -> Reply {
        vec![messages::UPGRADE_STUB.to_string()]
    }

    fn operator_only(&self) -> bool {
        true
    }
}
