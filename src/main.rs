//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: configuration and types
//! - Infrastructure: Matrix transport, process runner
//! - Application: registry, parser, guard, router
//! - Interface: command handlers
//!
//! Startup failures (bad config, failed login, failed initial sync) are
//! fatal; once listening, only the kill command ends the process.

#![recursion_limit = "256"]

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::message::{MessageType, SyncRoomMessageEvent},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::application::guard::OutboundGuard;
use crate::application::registry::{CommandContext, default_registry};
use crate::application::router::EventRouter;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChannelProvider;
use crate::domain::types::InboundMessage;
use crate::infrastructure::matrix::MatrixChannel;
use crate::infrastructure::process::ProcessRunner;
use crate::strings::messages;

#[derive(Parser, Debug)]
#[command(name = "heimdall", about = "Remote-control bot for a Matrix account")]
struct Cli {
    /// Path to config.yaml (defaults to the XDG config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Logging Setup: session log file plus stdout.
    if !std::path::Path::new("data").exists() {
        std::fs::create_dir("data").context("Failed to create data directory")?;
    }
    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    tracing::info!("Starting heimdall...");

    // 2. Load Configuration
    let config_path = cli.config.unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path)?;

    // 3. Channel Login
    let client = Client::builder()
        .homeserver_url(&config.channel.homeserver)
        .build()
        .await
        .context("Failed to build channel client")?;

    client
        .matrix_auth()
        .login_username(&config.channel.username, &config.channel.password)
        .send()
        .await
        .context("Login failed")?;

    tracing::info!("Logged in as {}", config.channel.username);

    if let Some(name) = &config.channel.display_name {
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("failed to set display name: {}", e);
        }
    }

    client
        .sync_once(SyncSettings::default())
        .await
        .context("Initial sync failed")?;

    // 4. Assemble the Engine
    let channel: Arc<dyn ChannelProvider> = Arc::new(MatrixChannel::new(client.clone()));
    let self_identity = channel.own_identity();
    let procs = Arc::new(ProcessRunner::new(Duration::from_secs(
        config.process.timeout_secs,
    )));
    let guard = Arc::new(OutboundGuard::new(
        channel,
        config.channel.operator.clone(),
    ));
    let registry = Arc::new(default_registry()?);
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let ctx = Arc::new(CommandContext {
        config: config.clone(),
        procs,
        guard: guard.clone(),
        shutdown,
        command_names: registry.names(),
    });
    let router = Arc::new(EventRouter::new(registry, ctx, self_identity));

    // 5. Event Wiring
    let start_time = std::time::SystemTime::now();
    let handler_router = router.clone();
    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = handler_router.clone();
        async move {
            let Some(original) = ev.as_original() else {
                return;
            };

            // Ignore events replayed from before this session.
            let ts = ev.origin_server_ts();
            let event_time = std::time::UNIX_EPOCH + Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            if !room.is_direct().await.unwrap_or(false) {
                router.on_unrelated_event(&format!("message in room {}", room.room_id()));
                return;
            }

            if let MessageType::Text(text) = &original.content.msgtype {
                router.handle_event(InboundMessage::new(
                    original.sender.to_string(),
                    text.body.clone(),
                ));
            }
        }
    });

    // 6. Liveness Announcement
    if let Err(e) = guard.send(messages::COMING_ONLINE, None).await {
        tracing::warn!("startup announcement failed: {}", e);
    }

    // 7. Listen until the kill command flips the shutdown signal.
    let sync_client = client.clone();
    let sync_router = router.clone();
    let sync_handle = tokio::spawn(async move {
        if let Err(e) = sync_client.sync(SyncSettings::default()).await {
            sync_router.on_transport_error(&e.to_string()).await;
        }
    });

    tokio::select! {
        _ = shutdown_rx.changed() => {
            tracing::info!("Shutdown requested");
        }
        _ = sync_handle => {
            tracing::warn!("Sync loop ended");
        }
    }

    // Final words.
    if let Err(e) = guard.send(messages::GOING_DOWN, None).await {
        tracing::warn!("shutdown announcement failed: {}", e);
    }

    Ok(())
}
