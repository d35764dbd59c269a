use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{GuildId, MessageId, PendingQuestion, UserId},
    errors::Error,
    Result,
};

use super::port::QuestionStore;

/// In-process store keeping per-user FIFO queues.
///
/// Backs single-process deployments and tests. `enqueue` is the integration
/// point for the ask flow; answered records leave via `remove_question`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<UserId, Vec<PendingQuestion>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question to the back of the recipient's queue.
    pub async fn enqueue(&self, question: PendingQuestion) {
        let mut inner = self.inner.lock().await;
        inner.entry(question.user_id).or_default().push(question);
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn pending_for(&self, user_id: UserId) -> Result<Vec<PendingQuestion>> {
        let inner = self.inner.lock().await;
        Ok(inner.get(&user_id).cloned().unwrap_or_default())
    }

    async fn remove_question(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        for queue in inner.values_mut() {
            if let Some(pos) = queue.iter().position(|q| q.id == id) {
                queue.remove(pos);
                return Ok(());
            }
        }
        Err(Error::Store(format!("no pending question with id {id}")))
    }

    async fn next_pending(&self, user_id: UserId) -> Result<Option<PendingQuestion>> {
        let inner = self.inner.lock().await;
        Ok(inner.get(&user_id).and_then(|queue| queue.first().cloned()))
    }

    async fn set_message_id(
        &self,
        user_id: UserId,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let slot = inner
            .get_mut(&user_id)
            .and_then(|queue| {
                queue
                    .iter_mut()
                    .find(|q| q.guild_id == guild_id && q.dm_message_id.is_none())
            })
            .ok_or_else(|| {
                Error::Store(format!(
                    "no unsent question for user {} in guild {}",
                    user_id.0, guild_id.0
                ))
            })?;
        slot.dm_message_id = Some(message_id);
        Ok(())
    }

    async fn users_with_pending(&self) -> Result<Vec<UserId>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(user, _)| *user)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelId, Rating};

    fn question(id: &str, user: u64, guild: u64) -> PendingQuestion {
        PendingQuestion {
            id: id.to_string(),
            user_id: UserId(user),
            guild_id: GuildId(guild),
            channel_id: ChannelId(100),
            dm_message_id: None,
            question_id: format!("q-{id}"),
            question_text: "who here would do it?".to_string(),
            rating: Rating::Pg13,
        }
    }

    #[tokio::test]
    async fn queues_are_fifo_per_user() {
        let store = MemoryStore::new();
        store.enqueue(question("a", 1, 10)).await;
        store.enqueue(question("b", 1, 20)).await;
        store.enqueue(question("c", 2, 10)).await;

        let pending = store.pending_for(UserId(1)).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, "a");
        assert_eq!(pending[1].id, "b");

        store.remove_question("a").await.unwrap();
        let next = store.next_pending(UserId(1)).await.unwrap().unwrap();
        assert_eq!(next.id, "b");
    }

    #[tokio::test]
    async fn removing_unknown_id_is_an_error() {
        let store = MemoryStore::new();
        assert!(store.remove_question("nope").await.is_err());
    }

    #[tokio::test]
    async fn set_message_id_targets_the_unsent_record() {
        let store = MemoryStore::new();
        let mut sent = question("a", 1, 10);
        sent.dm_message_id = Some(MessageId(111));
        store.enqueue(sent).await;
        store.enqueue(question("b", 1, 10)).await;

        store
            .set_message_id(UserId(1), GuildId(10), MessageId(222))
            .await
            .unwrap();

        let pending = store.pending_for(UserId(1)).await.unwrap();
        assert_eq!(pending[0].dm_message_id, Some(MessageId(111)));
        assert_eq!(pending[1].dm_message_id, Some(MessageId(222)));
    }

    #[tokio::test]
    async fn users_with_pending_skips_drained_queues() {
        let store = MemoryStore::new();
        store.enqueue(question("a", 1, 10)).await;
        store.enqueue(question("b", 2, 10)).await;
        store.remove_question("b").await.unwrap();

        let users = store.users_with_pending().await.unwrap();
        assert_eq!(users, vec![UserId(1)]);
    }
}
