//! Publishing messages to a ntfy server
//!
//! A [`Publisher`] holds everything computed once at construction: the
//! decomposed server URL, the Authorization header, and the pooled
//! blocking HTTP client. Each publish call is a single POST; the response
//! is returned for the caller to inspect and an HTTP error status is not
//! treated as a failure here.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::auth::{auth_header, BasicAuth};
use crate::errors::{Error, Result};
use crate::message::{Message, PublishArgs};
use crate::url::NtfyUrl;

/// Blocking client that publishes messages (or raw JSON) to one ntfy
/// server.
///
/// The connection pool is opened eagerly at construction and released by
/// [`close`](Self::close) (or by dropping the publisher). Publishing
/// after `close` fails with [`Error::Closed`].
///
/// # Example
///
/// ```rust,no_run
/// use ntfy_api::{PublishArgs, Publisher};
///
/// fn main() -> ntfy_api::Result<()> {
///     let mut publisher = Publisher::new("https://ntfy.sh", None, None, Some(30))?;
///     publisher.publish(&PublishArgs {
///         topic: Some("alerts".into()),
///         body: b"disk almost full".to_vec(),
///         ..Default::default()
///     })?;
///     publisher.close();
///     Ok(())
/// }
/// ```
pub struct Publisher {
    url: NtfyUrl,
    auth: HeaderMap,
    client: Option<Client>,
}

impl Publisher {
    /// Create a publisher for the given server URL.
    ///
    /// `basic` and `bearer` configure authentication; when both are set,
    /// `bearer` is used. `timeout_secs` is handed through to the HTTP
    /// client unchanged; `None` means no request timeout.
    pub fn new(
        ntfy_url: &str,
        basic: Option<BasicAuth>,
        bearer: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let url = NtfyUrl::parse(ntfy_url)?;
        let auth = auth_header(bearer, basic.as_ref())?;

        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            url,
            auth,
            client: Some(client),
        })
    }

    fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(Error::Closed)
    }

    /// Publish a message with one blocking POST.
    ///
    /// A non-empty topic is appended verbatim to the server path (no
    /// percent-encoding; encode reserved characters before calling);
    /// otherwise the base URL receives the POST. Message headers are
    /// merged over the auth header, message side winning on collision.
    ///
    /// The response is returned unexamined: a 4xx/5xx status is the
    /// caller's to interpret, not an `Err` from this method.
    pub fn publish<M: Message>(&self, message: &M) -> Result<Response> {
        let client = self.client()?;
        let PublishArgs {
            topic,
            headers,
            body,
        } = message.publish_args();

        let url = match topic.as_deref() {
            Some(topic) if !topic.is_empty() => self.url.unparse_with_topic(topic),
            _ => self.url.unparse(),
        };

        let mut merged = self.auth.clone();
        for (name, value) in headers.iter() {
            merged.insert(name, value.clone());
        }

        debug!("POST {url}");
        let response = client.post(url).headers(merged).body(body).send()?;
        Ok(response)
    }

    /// Publish an arbitrary serializable value as a JSON document.
    ///
    /// JSON publishes always target the base server URL; the topic lives
    /// in the payload itself, per the ntfy JSON publishing convention.
    pub fn publish_json<T: Serialize>(&self, raw: &T) -> Result<Response> {
        let client = self.client()?;
        let body = serde_json::to_vec(raw).map_err(Error::Serialization)?;

        let mut headers = self.auth.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let url = self.url.unparse();
        debug!("POST {url}");
        let response = client.post(url).headers(headers).body(body).send()?;
        Ok(response)
    }

    /// Release the HTTP connection pool. Calling `close` on an already
    /// closed publisher is a no-op.
    pub fn close(&mut self) {
        self.client = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = Publisher::new("not a url", None, None, None);
        assert!(matches!(result, Err(Error::InvalidUrl { .. })));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut publisher = Publisher::new("http://host", None, None, None).unwrap();
        publisher.close();
        publisher.close();
    }

    #[test]
    fn test_publish_after_close_fails() {
        let mut publisher = Publisher::new("http://host", None, None, None).unwrap();
        publisher.close();

        let result = publisher.publish(&PublishArgs::default());
        assert!(matches!(result, Err(Error::Closed)));

        let result = publisher.publish_json(&serde_json::json!({"topic": "t"}));
        assert!(matches!(result, Err(Error::Closed)));
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("refuses to serialize"))
        }
    }

    #[test]
    fn test_unserializable_payload_fails_before_sending() {
        let publisher = Publisher::new("http://host", None, None, None).unwrap();
        let result = publisher.publish_json(&Unserializable);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
