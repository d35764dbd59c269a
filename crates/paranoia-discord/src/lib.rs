//! Discord adapter.
//!
//! Implements the `paranoia-core` ChatPort over Discord's REST API with a
//! plain `reqwest` client and bot-token auth.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use paranoia_core::{
    config::Config,
    domain::{ChannelId, GuildId, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::{port::ChatPort, types::OutgoingMessage},
    Result,
};

pub mod router;
mod wire;

#[derive(Clone)]
pub struct DiscordRest {
    http: reqwest::Client,
    token: String,
    base: String,
}

/// A message read back from a DM channel during polling.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub id: MessageId,
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub author_avatar: Option<String>,
    pub from_bot: bool,
}

impl DiscordRest {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.http_timeout)
            .build()
            .map_err(|e| Error::External(format!("http client build: {e}")))?;
        Ok(Self {
            http,
            token: cfg.bot_token.clone(),
            base: cfg.api_base.clone(),
        })
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(Error::External(format!(
            "{what} failed: {status} {}",
            body.chars().take(200).collect::<String>()
        )))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
        what: &str,
    ) -> Result<T> {
        let body = resp
            .text()
            .await
            .map_err(|e| Error::External(format!("{what} read error: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Open (or fetch the cached) DM channel with a user.
    pub async fn create_dm(&self, user_id: UserId) -> Result<ChannelId> {
        let url = format!("{}/users/@me/channels", self.base);
        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.auth())
            .json(&wire::CreateDm {
                recipient_id: user_id.0.to_string(),
            })
            .send()
            .await
            .map_err(|e| Error::External(format!("create-dm request error: {e}")))?;
        let resp = Self::check(resp, "create-dm").await?;
        let channel: wire::Channel = Self::read_json(resp, "create-dm").await?;
        Ok(ChannelId(wire::parse_snowflake(&channel.id)?))
    }

    /// The newest message id in a channel, if the channel has any messages.
    /// Used as the polling baseline so history is never replayed.
    pub async fn latest_message_id(&self, channel_id: ChannelId) -> Result<Option<MessageId>> {
        let url = format!("{}/channels/{}/messages", self.base, channel_id.0);
        let resp = self
            .http
            .get(&url)
            .query(&[("limit", "1")])
            .header(AUTHORIZATION, self.auth())
            .send()
            .await
            .map_err(|e| Error::External(format!("message-list request error: {e}")))?;
        let resp = Self::check(resp, "message-list").await?;
        let messages: Vec<wire::Message> = Self::read_json(resp, "message-list").await?;
        match messages.first() {
            Some(m) => Ok(Some(MessageId(wire::parse_snowflake(&m.id)?))),
            None => Ok(None),
        }
    }

    /// Messages in a channel newer than `after`, oldest first.
    pub async fn messages_after(
        &self,
        channel_id: ChannelId,
        after: MessageId,
    ) -> Result<Vec<InboundMessage>> {
        let url = format!("{}/channels/{}/messages", self.base, channel_id.0);
        let resp = self
            .http
            .get(&url)
            .query(&[("after", after.0.to_string()), ("limit", "100".to_string())])
            .header(AUTHORIZATION, self.auth())
            .send()
            .await
            .map_err(|e| Error::External(format!("message-list request error: {e}")))?;
        let resp = Self::check(resp, "message-list").await?;
        let raw: Vec<wire::Message> = Self::read_json(resp, "message-list").await?;

        let mut messages = Vec::with_capacity(raw.len());
        for m in raw {
            messages.push(InboundMessage {
                id: MessageId(wire::parse_snowflake(&m.id)?),
                content: m.content,
                author_id: UserId(wire::parse_snowflake(&m.author.id)?),
                author_username: m.author.username,
                author_avatar: m.author.avatar,
                from_bot: m.author.bot,
            });
        }
        // The API returns newest first.
        messages.sort_by_key(|m| m.id);
        Ok(messages)
    }
}

#[async_trait]
impl ChatPort for DiscordRest {
    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<MessageId> {
        let url = format!("{}/channels/{}/messages", self.base, channel_id.0);
        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.auth())
            .json(message)
            .send()
            .await
            .map_err(|e| Error::External(format!("send-message request error: {e}")))?;
        let resp = Self::check(resp, "send-message").await?;
        let created: wire::Message = Self::read_json(resp, "send-message").await?;
        Ok(MessageId(wire::parse_snowflake(&created.id)?))
    }

    async fn edit_message(&self, target: MessageRef, message: &OutgoingMessage) -> Result<()> {
        let url = format!(
            "{}/channels/{}/messages/{}",
            self.base, target.channel_id.0, target.message_id.0
        );
        let resp = self
            .http
            .patch(&url)
            .header(AUTHORIZATION, self.auth())
            .json(message)
            .send()
            .await
            .map_err(|e| Error::External(format!("edit-message request error: {e}")))?;
        Self::check(resp, "edit-message").await?;
        Ok(())
    }

    async fn guild_name(&self, guild_id: GuildId) -> Result<String> {
        let url = format!("{}/guilds/{}", self.base, guild_id.0);
        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.auth())
            .send()
            .await
            .map_err(|e| Error::External(format!("guild-fetch request error: {e}")))?;
        let resp = Self::check(resp, "guild-fetch").await?;
        let guild: wire::Guild = Self::read_json(resp, "guild-fetch").await?;
        Ok(guild.name)
    }
}
