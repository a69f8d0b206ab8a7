//! Messages received from a ntfy event stream
//!
//! The server emits one JSON document per line; these types are the
//! deserialized views. Unknown fields are ignored so newer server
//! versions keep decoding.

use serde::Deserialize;

/// Event type of a received message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Stream opened
    Open,
    /// A published notification
    Message,
    /// Periodic keepalive
    Keepalive,
    /// Poll request marker
    PollRequest,
}

/// Details about an attachment carried by a message
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Name of the attachment
    pub name: String,
    /// URL of the attachment
    pub url: String,
    /// Mime type (only if uploaded to the ntfy server)
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Size in bytes (only if uploaded to the ntfy server)
    pub size: Option<u64>,
    /// Expiry date as Unix timestamp (only if uploaded to the ntfy server)
    pub expires: Option<i64>,
}

/// One message received from the ntfy server
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivedMessage {
    /// Randomly chosen message identifier
    pub id: String,
    /// Message datetime as Unix timestamp
    pub time: i64,
    /// Type of event
    pub event: Event,
    /// Topic(s) the message is associated with, comma-separated
    pub topic: String,
    /// Message body, always present in `message` events
    pub message: Option<String>,
    /// When the message will be deleted, if cached
    pub expires: Option<i64>,
    /// Message title
    pub title: Option<String>,
    /// Tags, which may map to emojis
    pub tags: Option<Vec<String>>,
    /// Priority (1=min, 3=default, 5=max)
    pub priority: Option<u8>,
    /// Website opened when the notification is clicked
    pub click: Option<String>,
    /// Action buttons that can be displayed
    pub actions: Option<Vec<serde_json::Value>>,
    /// Attachment details, if present
    pub attachment: Option<Attachment>,
    /// Content type of the message body
    pub content_type: Option<String>,
}
