//! Discord JSON shapes (only the fields this bot reads or writes).

use serde::{Deserialize, Serialize};

use paranoia_core::{errors::Error, Result};

#[derive(Serialize)]
pub(crate) struct CreateDm {
    pub recipient_id: String,
}

#[derive(Deserialize)]
pub(crate) struct Channel {
    pub id: String,
}

#[derive(Deserialize)]
pub(crate) struct Guild {
    pub name: String,
}

#[derive(Deserialize)]
pub(crate) struct Message {
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub author: Author,
}

#[derive(Deserialize)]
pub(crate) struct Author {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

/// Snowflakes are string-encoded on the wire but numeric in the domain.
pub(crate) fn parse_snowflake(raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| Error::External(format!("invalid snowflake: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflakes_parse_from_strings() {
        assert_eq!(parse_snowflake("123456789012345678").unwrap(), 123456789012345678);
        assert!(parse_snowflake("not-a-snowflake").is_err());
        assert!(parse_snowflake("").is_err());
    }

    #[test]
    fn message_deserializes_with_optional_fields_absent() {
        let raw = r#"{
            "id": "42",
            "author": { "id": "7", "username": "alice" }
        }"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.id, "42");
        assert_eq!(msg.content, "");
        assert_eq!(msg.author.username, "alice");
        assert!(msg.author.avatar.is_none());
        assert!(!msg.author.bot);
    }
}
