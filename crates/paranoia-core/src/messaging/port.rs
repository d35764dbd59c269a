use async_trait::async_trait;

use crate::{
    domain::{ChannelId, GuildId, MessageId, MessageRef},
    messaging::types::OutgoingMessage,
    Result,
};

/// Narrow port over the chat platform's REST surface.
///
/// Discord is the first implementation; keeping the surface this small is
/// what lets the command handlers run against in-process fakes in tests.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Post a message to a channel, returning the created message's id.
    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<MessageId>;

    /// Replace the content of an existing message.
    async fn edit_message(&self, target: MessageRef, message: &OutgoingMessage) -> Result<()>;

    /// Display name of a guild.
    async fn guild_name(&self, guild_id: GuildId) -> Result<String>;
}

/// Reply surface back to the invoking user, on whatever channel the command
/// arrived from.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, text: &str) -> Result<()>;
}
