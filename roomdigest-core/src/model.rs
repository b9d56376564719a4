use std::fmt;
use std::iter;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DigestError, Result};

// Unrecognised tags are kept verbatim; a missing or null msgtype is an empty
// `Unknown` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum MessageKind {
    Text,
    Emote,
    Notice,
    Image,
    File,
    Unknown(String),
}

impl MessageKind {
    pub fn from_tag(tag: &str) -> Self {
        let lowered = tag.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("m.").unwrap_or(&lowered);
        match name {
            "text" => Self::Text,
            "emote" => Self::Emote,
            "notice" => Self::Notice,
            "image" => Self::Image,
            "file" => Self::File,
            _ => Self::Unknown(tag.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Text => "m.text",
            Self::Emote => "m.emote",
            Self::Notice => "m.notice",
            Self::Image => "m.image",
            Self::File => "m.file",
            Self::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Default for MessageKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<Option<String>> for MessageKind {
    fn from(tag: Option<String>) -> Self {
        tag.map_or_else(Self::default, |tag| Self::from_tag(&tag))
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        kind.as_tag().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender_name: String,
    #[serde(alias = "ts")]
    pub timestamp: i64,
    #[serde(default, alias = "msgtype")]
    pub kind: MessageKind,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body_text_plain: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub room: RoomInfo,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    // Missing or null is not the same as an empty batch.
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
}

impl NotificationPayload {
    pub fn from_json_str(raw: &str, source: &Path) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source_err| DigestError::InvalidJson {
            path: source.to_path_buf(),
            source: source_err,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFragment {
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RenderedFragment {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        iter::once(self.header.as_str()).chain(self.body.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestView {
    pub room_title: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub fragments: Vec<RenderedFragment>,
    pub footer: String,
    pub digest: String,
}
