//! # Matrix Channel Adapter
//!
//! Implements the `ChannelProvider` trait for the Matrix protocol using the
//! `matrix_sdk`. This module acts as the bridge between the generic channel
//! interface used by the bot's core logic and the specific implementation
//! details of the Matrix SDK.

use crate::domain::traits::ChannelProvider;
use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::ruma::UserId;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;
use std::convert::TryFrom;

#[derive(Clone)]
pub struct MatrixChannel {
    client: Client,
}

impl MatrixChannel {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChannelProvider for MatrixChannel {
    fn own_identity(&self) -> String {
        self.client
            .user_id()
            .map(|u| u.to_string())
            .unwrap_or_default()
    }

    async fn send_direct(&self, recipient: &str, text: &str) -> Result<String, String> {
        tracing::info!("Bot sending DM to {}: {}", recipient, text);
        let user = <&UserId>::try_from(recipient).map_err(|e| e.to_string())?;

        // Reuse an existing DM room where one exists; first contact creates it.
        let room = match self.client.get_dm_room(user) {
            Some(room) => room,
            None => self
                .client
                .create_dm(user)
                .await
                .map_err(|e| e.to_string())?,
        };

        room.send(RoomMessageEventContent::text_plain(text))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }
}
