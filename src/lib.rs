//! Rust client for the [ntfy](https://ntfy.sh) publish/subscribe
//! notification service.
//!
//! Publishing is a single blocking POST per message: a [`Publisher`] is
//! built once with the server URL and optional credentials, then reused.
//! [`Subscriber`] reads the server's JSON event stream, either live or as
//! a one-shot poll.
//!
//! # Publishing
//!
//! ```rust,no_run
//! use ntfy_api::{BasicAuth, PublishArgs, Publisher};
//!
//! fn main() -> ntfy_api::Result<()> {
//!     let basic = BasicAuth::UserPass("user".into(), "pass".into());
//!     let mut publisher = Publisher::new("https://ntfy.sh", Some(basic), None, Some(30))?;
//!
//!     publisher.publish(&PublishArgs {
//!         topic: Some("alerts".into()),
//!         body: b"backup finished".to_vec(),
//!         ..Default::default()
//!     })?;
//!
//!     publisher.close();
//!     Ok(())
//! }
//! ```
//!
//! HTTP error statuses are not errors at this layer: `publish` returns
//! the response for the caller to inspect.

pub mod auth;
pub mod errors;
pub mod message;
pub mod publisher;
pub mod subscriber;

mod url;

// Re-export commonly used types for convenience
pub use auth::BasicAuth;
pub use errors::{Error, Result};
pub use message::{Message, PublishArgs};
pub use publisher::Publisher;
pub use subscriber::message::{Attachment, Event, ReceivedMessage};
pub use subscriber::{Filters, Messages, Subscriber};
