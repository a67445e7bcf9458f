//! # Command Registry
//!
//! The authoritative, closed set of command names and their handler
//! bindings. A name is a valid command iff it was registered here — never
//! inferred from what any object happens to expose. Built once at startup
//! and immutable thereafter.

use crate::domain::config::AppConfig;
use crate::domain::error::RegistryError;
use crate::domain::types::Reply;
use crate::application::guard::OutboundGuard;
use crate::infrastructure::process::ProcessRunner;
use crate::interface::commands;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared collaborators handed to every handler invocation.
pub struct CommandContext {
    pub config: AppConfig,
    pub procs: Arc<ProcessRunner>,
    pub guard: Arc<OutboundGuard>,
    /// Flipped to `true` by the kill command; the main loop watches it.
    pub shutdown: watch::Sender<bool>,
    /// Snapshot of the registered names, for the help listing.
    pub command_names: Vec<String>,
}

/// One behavior per registered command.
///
/// `run` is infallible from the router's point of view: handlers convert any
/// external-collaborator failure into reply text (or log and swallow it for
/// no-reply commands) rather than propagate.
#[async_trait]
pub trait Command: Send + Sync {
    async fn run(&self, ctx: &CommandContext, args: &[String], caller: &str) -> Reply;

    /// Commands that change system state are honored only from the operator.
    fn operator_only(&self) -> bool {
        false
    }
}

pub struct CommandRegistry {
    entries: BTreeMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn register(
        &mut self,
        name: &str,
        handler: Arc<dyn Command>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.entries.insert(name.to_string(), handler);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The full command surface of the bot.
pub fn default_registry() -> Result<CommandRegistry, RegistryError> {
    let mut registry = CommandRegistry::new();
    registry.register("alert", Arc::new(commands::notify::Alert))?;
    registry.register("exec", Arc::new(commands::misc::Exec))?;
    registry.register("help", Arc::new(commands::help::Help))?;
    registry.register("info", Arc::new(commands::info::Info))?;
    registry.register("kill", Arc::new(commands::kill::Kill))?;
    registry.register("say", Arc::new(commands::notify::Say))?;
    registry.register("time", Arc::new(commands::misc::Time))?;
    registry.register("todo", Arc::new(commands::todo::Todo))?;
    registry.register("update", Arc::new(commands::system::Update))?;
    registry.register("upgrade", Arc::new(commands::system::Upgrade))?;
    Ok(registry)
}
