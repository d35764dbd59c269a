//! The `/ans` command: publish the answer to a user's oldest pending
//! paranoia question, then advance their queue.

use std::sync::Arc;

use tracing::warn;

use crate::{
    domain::{ChannelId, GuildId, MessageRef, PendingQuestion, UserId},
    formatting::{avatar_url, truncate_answer},
    messaging::{
        port::{ChatPort, Responder},
        types::{Embed, EmbedAuthor, EmbedField, EmbedFooter, OutgoingMessage},
    },
    reveal::{question_or_hidden, Coin},
    store::QuestionStore,
    Result,
};

pub const CHECKMARK: &str = "✅";

/// Who invoked the command and from where.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub user: Invoker,
    /// The DM channel the command arrived on.
    pub channel_id: ChannelId,
    /// Present when invoked from a guild channel. Questions can only be
    /// answered in DMs, so this makes the invocation invalid.
    pub guild_id: Option<GuildId>,
}

#[derive(Clone, Debug)]
pub struct Invoker {
    pub id: UserId,
    pub username: String,
    /// Avatar hash, used for the embed author icon.
    pub avatar: Option<String>,
}

/// Orchestrates the answer-and-advance sequence for one invocation.
///
/// Failure policy: the primary publish halts the sequence and tells the
/// user; the prompt edit and the whole queue advance are best-effort and
/// only logged. Nothing is retried and nothing already sent is rolled back.
pub struct AnswerCommand {
    chat: Arc<dyn ChatPort>,
    store: Arc<dyn QuestionStore>,
    coin: Arc<dyn Coin>,
}

impl AnswerCommand {
    pub fn new(chat: Arc<dyn ChatPort>, store: Arc<dyn QuestionStore>, coin: Arc<dyn Coin>) -> Self {
        Self { chat, store, coin }
    }

    pub async fn run(
        &self,
        invocation: &Invocation,
        responder: &dyn Responder,
        answer: &str,
    ) -> Result<()> {
        if invocation.guild_id.is_some() {
            return responder
                .reply("Paranoia questions can only be answered in DMs")
                .await;
        }

        let pending = self.store.pending_for(invocation.user.id).await?;
        let Some(current) = pending.first() else {
            return responder
                .reply("There are no active paranoia questions")
                .await;
        };

        // Publish the answer to the channel the question was asked from.
        let published = self
            .chat
            .send_message(
                current.channel_id,
                &self.answer_message(invocation, current, answer),
            )
            .await;
        if let Err(e) = published {
            warn!(
                "failed to publish answer to channel {}: {e}",
                current.channel_id.0
            );
            return responder
                .reply("Failed to send message, try again later")
                .await;
        }

        // Mark the DM prompt answered so the user can tell which questions
        // are still live.
        self.mark_prompt_answered(invocation.channel_id, current)
            .await;

        // The record is only deleted after a successful publish.
        self.store.remove_question(&current.id).await?;

        responder.reply(&format!("{CHECKMARK} Answer sent!")).await?;

        self.advance_queue(invocation).await;
        Ok(())
    }

    fn answer_message(
        &self,
        invocation: &Invocation,
        current: &PendingQuestion,
        answer: &str,
    ) -> OutgoingMessage {
        let icon_url = invocation
            .user
            .avatar
            .as_deref()
            .map(|hash| avatar_url(invocation.user.id.0, hash));

        OutgoingMessage::embed(Embed {
            title: Some("Paranoia Answer".to_string()),
            author: Some(EmbedAuthor {
                name: invocation.user.username.clone(),
                icon_url,
            }),
            fields: vec![
                EmbedField {
                    name: "Question:".to_string(),
                    value: question_or_hidden(&current.question_text, self.coin.as_ref()),
                },
                EmbedField {
                    name: format!("{}'s Answer:", invocation.user.username),
                    value: truncate_answer(answer),
                },
            ],
            ..Default::default()
        })
    }

    async fn mark_prompt_answered(&self, dm_channel: ChannelId, current: &PendingQuestion) {
        let Some(message_id) = current.dm_message_id else {
            warn!("pending question {} has no DM prompt to edit", current.id);
            return;
        };

        let target = MessageRef {
            channel_id: dm_channel,
            message_id,
        };
        let marker = OutgoingMessage::embed(Embed {
            title: Some("Question Answered".to_string()),
            ..Default::default()
        });
        if let Err(e) = self.chat.edit_message(target, &marker).await {
            warn!("failed to edit DM prompt {}: {e}", message_id.0);
        }
    }

    /// Promote the next queued question, if any, by sending a fresh DM
    /// prompt and recording its message id so a later `/ans` can edit it.
    /// Every failure here is logged and otherwise dropped; the user is not
    /// told the advance failed.
    async fn advance_queue(&self, invocation: &Invocation) {
        let next = match self.store.next_pending(invocation.user.id).await {
            Ok(Some(next)) => next,
            Ok(None) => return,
            Err(e) => {
                warn!("next-question lookup failed: {e}");
                return;
            }
        };

        let guild = match self.chat.guild_name(next.guild_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!("guild fetch failed for {}: {e}", next.guild_id.0);
                return;
            }
        };

        let prompt = OutgoingMessage::embed(Embed {
            title: Some(format!("Paranoia Question from **{guild}**")),
            description: Some("Use `/ans` to answer this question".to_string()),
            fields: vec![EmbedField {
                name: " ".to_string(),
                value: next.question_text.clone(),
            }],
            footer: Some(EmbedFooter {
                text: format!(
                    "Type: PARANOIA | Rating: {} | ID: {}",
                    next.rating, next.question_id
                ),
            }),
            ..Default::default()
        });

        let message_id = match self.chat.send_message(invocation.channel_id, &prompt).await {
            Ok(id) => id,
            Err(e) => {
                warn!("DM prompt send failed: {e}");
                return;
            }
        };

        if let Err(e) = self
            .store
            .set_message_id(next.user_id, next.guild_id, message_id)
            .await
        {
            warn!("failed to record DM prompt id {}: {e}", message_id.0);
        }
    }
}
