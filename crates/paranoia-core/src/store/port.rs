use async_trait::async_trait;

use crate::{
    domain::{GuildId, MessageId, PendingQuestion, UserId},
    Result,
};

/// Port over the external question database.
///
/// Records are created by the ask/enqueue flow (another component); this bot
/// only reads them, deletes them once answered, and attaches DM prompt
/// message ids. `pending_for` returns a user's questions oldest first; the
/// head of that list is the "current" question the answer command acts on.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn pending_for(&self, user_id: UserId) -> Result<Vec<PendingQuestion>>;

    /// Delete an answered record by its store id.
    async fn remove_question(&self, id: &str) -> Result<()>;

    /// The question promoted to current after a removal, if any.
    async fn next_pending(&self, user_id: UserId) -> Result<Option<PendingQuestion>>;

    /// Attach a delivered DM prompt's message id to the next record for
    /// `(user, guild)` that has none.
    async fn set_message_id(
        &self,
        user_id: UserId,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> Result<()>;

    /// Users that currently have at least one pending question. The DM
    /// poller uses this to know whose channels to watch.
    async fn users_with_pending(&self) -> Result<Vec<UserId>>;
}
