//! # Outbound Message Guard
//!
//! Every reply leaves through here. The guard truncates to the channel's
//! 140-character limit, bumps a payload that would repeat the previous one
//! (the transport rejects duplicate content), and remembers the last text
//! actually delivered. Sends are serialized through one lock, which also
//! keeps a multi-line reply's messages in order.

use crate::domain::error::DeliveryError;
use crate::domain::traits::ChannelProvider;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Hard transport limit for a single direct message.
pub const MAX_DM_LEN: usize = 140;

pub struct OutboundGuard {
    channel: Arc<dyn ChannelProvider>,
    operator: String,
    last_sent: Mutex<String>,
}

impl OutboundGuard {
    pub fn new(channel: Arc<dyn ChannelProvider>, operator: String) -> Self {
        Self {
            channel,
            operator,
            last_sent: Mutex::new(String::new()),
        }
    }

    /// Send one message, defaulting the recipient to the operator.
    /// Returns the text actually transmitted (after truncation and any bump).
    pub async fn send(
        &self,
        text: &str,
        recipient: Option<&str>,
    ) -> Result<String, DeliveryError> {
        let mut last = self.last_sent.lock().await;
        self.send_locked(&mut last, text, recipient.unwrap_or(&self.operator))
            .await
    }

    /// Send a reply's lines in order under one lock. Delivery is not atomic:
    /// a failure after N of M sends leaves the earlier messages delivered.
    pub async fn send_all(
        &self,
        lines: &[String],
        recipient: Option<&str>,
    ) -> Result<(), DeliveryError> {
        let recipient = recipient.unwrap_or(&self.operator);
        let mut last = self.last_sent.lock().await;
        for line in lines {
            self.send_locked(&mut last, line, recipient).await?;
        }
        Ok(())
    }

    async fn send_locked(
        &self,
        last: &mut String,
        text: &str,
        recipient: &str,
    ) -> Result<String, DeliveryError> {
        let mut payload = truncate(text).to_string();
        if payload == *last {
            payload = bump(&payload);
        }

        self.channel
            .send_direct(recipient, &payload)
            .await
            .map_err(DeliveryError::Rejected)?;

        // Only a delivered message participates in future dedup comparisons.
        *last = payload.clone();
        Ok(payload)
    }
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(MAX_DM_LEN) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Minimal deterministic mutation: replace the final character with its
/// successor scalar value, producing the lexicographically-next string.
fn bump(text: &str) -> String {
    let mut bumped = text.to_string();
    match bumped.pop() {
        Some(c) => bumped.push(successor(c)),
        None => bumped.push('.'),
    }
    bumped
}

fn successor(c: char) -> char {
    // from_u32 skips the surrogate gap for us.
    (c as u32 + 1..=char::MAX as u32)
        .find_map(char::from_u32)
        .unwrap_or('\u{0}')
}
