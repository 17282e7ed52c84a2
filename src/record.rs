use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Raw message text is cut to this many Unicode scalar values before storage.
pub const MAX_TEXT_CHARS: usize = 100;

/// What happened. Determines which stream the record lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Command,
    TextMessage,
    UnknownCommand,
    BotStarted,
    BotStopped,
    BotError,
}

/// Sender of an inbound message, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
    pub is_premium: Option<bool>,
}

/// Chat an inbound message arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatInfo {
    pub id: i64,
    /// Transport-level chat type, e.g. "private" or "group".
    pub kind: String,
}

/// One inbound message as handed over by the transport layer.
/// `user` may be absent (e.g. channel posts); user fields are then omitted
/// from the record rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user: Option<UserInfo>,
    pub chat: ChatInfo,
    pub message_id: i64,
    pub text: String,
}

/// One structured logged event. Immutable once built; serialized exactly once.
/// Serializes to a single flat JSON object with absent fields omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: String,
    pub kind: EventKind,
    pub payload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<Map<String, Value>>,
}

impl EventRecord {
    fn new(kind: EventKind, payload: String) -> Self {
        EventRecord {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            kind,
            payload,
            message_id: None,
            user_id: None,
            username: None,
            first_name: None,
            last_name: None,
            language_code: None,
            is_bot: None,
            is_premium: None,
            chat_id: None,
            chat_type: None,
            additional_data: None,
        }
    }

    /// Build a record for a user-originated event (command, text, unknown command).
    pub fn user_action(
        kind: EventKind,
        payload: impl Into<String>,
        message: &InboundMessage,
        additional_data: Option<Map<String, Value>>,
    ) -> Self {
        let mut record = EventRecord::new(kind, payload.into());
        record.message_id = Some(message.message_id);
        record.chat_id = Some(message.chat.id);
        record.chat_type = Some(message.chat.kind.clone());
        if let Some(user) = &message.user {
            record.user_id = Some(user.id);
            record.username = user.username.clone();
            record.first_name = user.first_name.clone();
            record.last_name = user.last_name.clone();
            record.language_code = user.language_code.clone();
            record.is_bot = Some(user.is_bot);
            record.is_premium = user.is_premium;
        }
        record.additional_data = additional_data;
        record
    }

    /// Build a record for a lifecycle event (started/stopped).
    pub fn system_event(
        kind: EventKind,
        payload: impl Into<String>,
        additional_data: Option<Map<String, Value>>,
    ) -> Self {
        let mut record = EventRecord::new(kind, payload.into());
        record.additional_data = additional_data;
        record
    }

    /// Build an error record, optionally tied to a user.
    pub fn error(
        payload: impl Into<String>,
        user_id: Option<i64>,
        additional_data: Option<Map<String, Value>>,
    ) -> Self {
        let mut record = EventRecord::new(EventKind::BotError, payload.into());
        record.user_id = user_id;
        record.additional_data = additional_data;
        record
    }

    /// Render the record as one self-contained JSON line (no trailing newline).
    /// JSON escaping keeps literal newlines in payloads out of the output.
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Cut free-form message text to `MAX_TEXT_CHARS` Unicode scalar values.
pub fn truncate_text(text: &str) -> String {
    text.chars().take(MAX_TEXT_CHARS).collect()
}
