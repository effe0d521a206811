//! Threads, messages, and streaming message deltas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation thread held by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentThread {
    pub id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

/// Author of a thread message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Lifecycle status of a thread message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    InProgress,
    Incomplete,
    Completed,
}

/// A message stored in a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub status: Option<MessageStatus>,
    #[serde(default)]
    pub content: Vec<MessageContent>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl ThreadMessage {
    /// Concatenated text content of the message.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                MessageContent::Text { text } => Some(text.value.as_str()),
                MessageContent::Unknown => None,
            })
            .collect()
    }

    /// True once the assistant has finished writing this message.
    pub fn is_completed_assistant_message(&self) -> bool {
        self.role == MessageRole::Assistant && self.status == Some(MessageStatus::Completed)
    }
}

/// One part of a message body.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: MessageText },
    #[serde(other)]
    Unknown,
}

/// Text payload with service annotations (file citations etc.), kept raw.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageText {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

/// Incremental update to a message under generation.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDeltaEvent {
    pub id: String,
    pub delta: MessageDelta,
}

impl MessageDeltaEvent {
    /// Concatenated text carried by this delta, in fragment order.
    pub fn text(&self) -> String {
        self.delta
            .content
            .iter()
            .filter_map(|part| match part {
                MessageDeltaContent::Text { text } => text.value.as_deref(),
                MessageDeltaContent::Unknown => None,
            })
            .collect()
    }
}

/// Body of a message delta.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDelta {
    #[serde(default)]
    pub content: Vec<MessageDeltaContent>,
}

/// One fragment of a message delta.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageDeltaContent {
    Text {
        text: MessageDeltaText,
    },
    #[serde(other)]
    Unknown,
}

/// Text fragment inside a delta.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDeltaText {
    #[serde(default)]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_text_concatenates_parts() {
        let message: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_1",
            "thread_id": "thread_1",
            "role": "assistant",
            "status": "completed",
            "created_at": 1_719_000_000,
            "content": [
                {"type": "text", "text": {"value": "It is ", "annotations": []}},
                {"type": "image_file", "image_file": {"file_id": "file_1"}},
                {"type": "text", "text": {"value": "sunny.", "annotations": []}}
            ]
        }))
        .unwrap();

        assert_eq!(message.text(), "It is sunny.");
        assert!(message.is_completed_assistant_message());
    }

    #[test]
    fn in_progress_assistant_message_is_not_completed() {
        let message: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_1",
            "thread_id": "thread_1",
            "role": "assistant",
            "status": "in_progress",
            "created_at": 1_719_000_000,
            "content": []
        }))
        .unwrap();

        assert!(!message.is_completed_assistant_message());
    }

    #[test]
    fn user_message_is_never_a_completed_assistant_message() {
        let message: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_2",
            "thread_id": "thread_1",
            "role": "user",
            "status": "completed",
            "created_at": 1_719_000_000,
            "content": [{"type": "text", "text": {"value": "hi", "annotations": []}}]
        }))
        .unwrap();

        assert!(!message.is_completed_assistant_message());
    }

    #[test]
    fn delta_text_joins_fragments_in_order() {
        let delta: MessageDeltaEvent = serde_json::from_value(json!({
            "id": "msg_1",
            "object": "thread.message.delta",
            "delta": {
                "content": [
                    {"index": 0, "type": "text", "text": {"value": "Li"}},
                    {"index": 0, "type": "text", "text": {"value": "sbon"}}
                ]
            }
        }))
        .unwrap();

        assert_eq!(delta.text(), "Lisbon");
    }

    #[test]
    fn delta_without_text_value_is_empty() {
        let delta: MessageDeltaEvent = serde_json::from_value(json!({
            "id": "msg_1",
            "delta": {"content": [{"index": 0, "type": "text", "text": {}}]}
        }))
        .unwrap();

        assert_eq!(delta.text(), "");
    }
}
