use std::fmt;

/// Discord user id (snowflake).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

/// Discord guild id (snowflake).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GuildId(pub u64);

/// Discord channel id (snowflake).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

/// Discord message id (snowflake).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

/// A stable reference to a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// Content rating attached to a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    Pg,
    Pg13,
    R,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rating::Pg => "PG",
            Rating::Pg13 => "PG13",
            Rating::R => "R",
        };
        f.write_str(s)
    }
}

/// One asked-but-unanswered paranoia question.
///
/// Created by the ask/enqueue flow (another component), deleted here once
/// answered. `dm_message_id` is attached only after the DM prompt has been
/// delivered; a record without it has no prompt to mark answered.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingQuestion {
    /// Store record id.
    pub id: String,
    /// Recipient who must answer.
    pub user_id: UserId,
    /// Guild the question was asked from.
    pub guild_id: GuildId,
    /// Channel the answer gets published to.
    pub channel_id: ChannelId,
    /// The DM prompt message, once delivered.
    pub dm_message_id: Option<MessageId>,
    pub question_id: String,
    pub question_text: String,
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_matches_wire_strings() {
        assert_eq!(Rating::Pg.to_string(), "PG");
        assert_eq!(Rating::Pg13.to_string(), "PG13");
        assert_eq!(Rating::R.to_string(), "R");
    }
}
