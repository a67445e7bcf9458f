//! # Test Doubles
//!
//! Shared fixtures for unit tests: a recording channel and a ready-made
//! command context.

use crate::application::guard::OutboundGuard;
use crate::application::registry::{CommandContext, default_registry};
use crate::domain::config::{AppConfig, ChannelConfig, ProcessConfig};
use crate::domain::traits::ChannelProvider;
use crate::infrastructure::process::ProcessRunner;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;

pub const SELF_IDENTITY: &str = "@heimdall:example.org";
pub const OPERATOR: &str = "@alex:example.org";
pub const STRANGER: &str = "@mallory:example.org";

/// Records every (recipient, text) pair; optionally fails each send.
pub struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        })
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelProvider for RecordingChannel {
    async fn send_direct(&self, recipient: &str, text: &str) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("duplicate content".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        Ok("$event".to_string())
    }

    fn own_identity(&self) -> String {
        SELF_IDENTITY.to_string()
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        channel: ChannelConfig {
            homeserver: "https://matrix.example.org".to_string(),
            username: "heimdall".to_string(),
            password: "hunter2".to_string(),
            operator: OPERATOR.to_string(),
            display_name: None,
        },
        process: ProcessConfig::default(),
    }
}

/// A full command context backed by the given channel double. The returned
/// receiver keeps the shutdown signal alive for the test's duration.
pub fn test_context(
    channel: Arc<RecordingChannel>,
) -> (Arc<CommandContext>, watch::Receiver<bool>) {
    let registry = default_registry().unwrap();
    let guard = Arc::new(OutboundGuard::new(channel, OPERATOR.to_string()));
    let (shutdown, shutdown_rx) = watch::channel(false);
    let ctx = Arc::new(CommandContext {
        config: test_config(),
        procs: Arc::new(ProcessRunner::new(Duration::from_secs(5))),
        guard,
        shutdown,
        command_names: registry.names(),
    });
    (ctx, shutdown_rx)
}
