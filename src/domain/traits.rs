//! # Domain Traits
//!
//! Abstract interface for the message channel. Allows for pluggable
//! implementations in the Infrastructure layer and test doubles.

use async_trait::async_trait;

/// Abstract interface for a private-message channel (e.g. Matrix, Console)
#[async_trait]
pub trait ChannelProvider: Send + Sync {
    /// Send a direct message to a user, returning the transport's event id
    async fn send_direct(&self, recipient: &str, text: &str) -> Result<String, String>;

    /// The bot's own account identity, used to suppress self-replies
    fn own_identity(&self) -> String;
}
