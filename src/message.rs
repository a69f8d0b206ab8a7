//! The publishable-message seam
//!
//! The publisher does not own a notification payload type. Anything that
//! can produce a target topic, extra request headers, and a raw body can
//! be published.

use reqwest::header::HeaderMap;

/// What a publish call needs from a message: where it goes and what is
/// sent.
#[derive(Debug, Clone, Default)]
pub struct PublishArgs {
    /// Target topic; `None` (or empty) posts to the base server URL
    pub topic: Option<String>,
    /// Message-specific request headers (`X-Title`, `X-Priority`, ...);
    /// these win over the client's auth header on collision
    pub headers: HeaderMap,
    /// Raw request body
    pub body: Vec<u8>,
}

/// Implemented by payload types that can be posted to a ntfy server.
pub trait Message {
    /// Extract the topic, headers, and body for one publish call.
    fn publish_args(&self) -> PublishArgs;
}

/// Ad-hoc payloads can be published directly.
impl Message for PublishArgs {
    fn publish_args(&self) -> PublishArgs {
        self.clone()
    }
}
