//! DM polling router.
//!
//! Discord delivers `/ans` invocations as DM text. The router polls the DM
//! channels of users who have pending questions, parses the command out of
//! new messages, and dispatches to the answer command. Handler failures are
//! logged and never take the loop down.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tracing::{info, warn};

use paranoia_core::{
    commands::answer::{AnswerCommand, Invocation, Invoker},
    config::Config,
    domain::{ChannelId, MessageId, UserId},
    messaging::{port::Responder, types::OutgoingMessage},
    reveal::FairCoin,
    store::QuestionStore,
    Result,
};

use crate::DiscordRest;

const USAGE: &str = "Usage: `/ans <answer>`";

struct DmResponder {
    chat: Arc<DiscordRest>,
    channel_id: ChannelId,
}

#[async_trait]
impl Responder for DmResponder {
    async fn reply(&self, text: &str) -> Result<()> {
        use paranoia_core::messaging::port::ChatPort;
        self.chat
            .send_message(self.channel_id, &OutgoingMessage::text(text))
            .await
            .map(|_| ())
    }
}

/// Extract the answer from a DM line invoking the command.
///
/// Returns `None` for non-command messages and `Some(answer)` for
/// `/ans ...` (or `!ans ...`); the answer may be empty when the required
/// option is missing.
pub fn parse_ans(text: &str) -> Option<&str> {
    let t = text.trim();
    let rest = t.strip_prefix("/ans").or_else(|| t.strip_prefix("!ans"))?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        // e.g. "/answers" is some other command
        return None;
    }
    Some(rest.trim())
}

pub async fn run_polling(
    cfg: Arc<Config>,
    chat: Arc<DiscordRest>,
    store: Arc<dyn QuestionStore>,
) -> anyhow::Result<()> {
    let command = AnswerCommand::new(chat.clone(), store.clone(), Arc::new(FairCoin));

    let mut dm_channels: HashMap<UserId, ChannelId> = HashMap::new();
    let mut cursors: HashMap<ChannelId, MessageId> = HashMap::new();

    info!("polling DM channels every {:?}", cfg.poll_interval);
    loop {
        let users = match store.users_with_pending().await {
            Ok(users) => users,
            Err(e) => {
                warn!("pending-user lookup failed: {e}");
                Vec::new()
            }
        };

        for user_id in users {
            let channel_id = match dm_channel(&chat, &mut dm_channels, user_id).await {
                Ok(id) => id,
                Err(e) => {
                    warn!("DM channel open failed for user {}: {e}", user_id.0);
                    continue;
                }
            };

            if let Err(e) = poll_channel(&command, &chat, &mut cursors, channel_id).await {
                warn!("poll failed for channel {}: {e}", channel_id.0);
            }
        }

        tokio::time::sleep(cfg.poll_interval).await;
    }
}

async fn dm_channel(
    chat: &DiscordRest,
    cache: &mut HashMap<UserId, ChannelId>,
    user_id: UserId,
) -> Result<ChannelId> {
    if let Some(&id) = cache.get(&user_id) {
        return Ok(id);
    }
    let id = chat.create_dm(user_id).await?;
    cache.insert(user_id, id);
    Ok(id)
}

async fn poll_channel(
    command: &AnswerCommand,
    chat: &Arc<DiscordRest>,
    cursors: &mut HashMap<ChannelId, MessageId>,
    channel_id: ChannelId,
) -> Result<()> {
    let Some(&cursor) = cursors.get(&channel_id) else {
        // First sighting: record a baseline so history is not replayed.
        let latest = chat
            .latest_message_id(channel_id)
            .await?
            .unwrap_or(MessageId(0));
        cursors.insert(channel_id, latest);
        return Ok(());
    };

    let messages = chat.messages_after(channel_id, cursor).await?;
    let Some(last) = messages.last() else {
        return Ok(());
    };
    cursors.insert(channel_id, last.id);

    for msg in &messages {
        if msg.from_bot {
            continue;
        }
        let Some(answer) = parse_ans(&msg.content) else {
            continue;
        };

        let responder = DmResponder {
            chat: chat.clone(),
            channel_id,
        };
        if answer.is_empty() {
            // The answer option is required; reject at the interface.
            if let Err(e) = responder.reply(USAGE).await {
                warn!("usage reply failed: {e}");
            }
            continue;
        }

        let invocation = Invocation {
            user: Invoker {
                id: msg.author_id,
                username: msg.author_username.clone(),
                avatar: msg.author_avatar.clone(),
            },
            channel_id,
            guild_id: None,
        };
        if let Err(e) = command.run(&invocation, &responder, answer).await {
            warn!("answer command failed for user {}: {e}", msg.author_id.0);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_answer_out_of_commands() {
        assert_eq!(parse_ans("/ans yes"), Some("yes"));
        assert_eq!(parse_ans("  /ans  definitely you  "), Some("definitely you"));
        assert_eq!(parse_ans("!ans no"), Some("no"));
    }

    #[test]
    fn missing_answer_is_empty_not_absent() {
        assert_eq!(parse_ans("/ans"), Some(""));
        assert_eq!(parse_ans("/ans   "), Some(""));
    }

    #[test]
    fn other_text_is_not_the_command() {
        assert_eq!(parse_ans("hello"), None);
        assert_eq!(parse_ans("/answers yes"), None);
        assert_eq!(parse_ans("ans yes"), None);
    }
}
