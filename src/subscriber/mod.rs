//! Subscribing to ntfy topics
//!
//! A [`Subscriber`] reads the server's newline-delimited JSON event
//! stream, either as a long-lived subscription ([`subscribe`]) or as a
//! one-shot fetch of pending messages ([`poll`]). Server-side filtering
//! is configured through [`Filters`] and sent as `X-*` request headers.
//!
//! [`subscribe`]: Subscriber::subscribe
//! [`poll`]: Subscriber::poll

pub mod message;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use std::io::{BufRead, BufReader, Lines};
use tracing::{debug, error, warn};

use crate::auth::{auth_header, BasicAuth};
use crate::errors::{Error, Result};
use crate::url::NtfyUrl;
use message::ReceivedMessage;

/// Server-side message filters, sent as request headers
///
/// All fields are optional; unset filters send no header.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Return cached messages since a timestamp, duration, or message id
    pub since: Option<String>,
    /// Include scheduled/delayed messages
    pub scheduled: Option<bool>,
    /// Only messages matching this exact message string
    pub message: Option<String>,
    /// Only messages matching this exact title string
    pub title: Option<String>,
    /// Only messages matching this exact message id
    pub id: Option<String>,
    /// Only messages matching any listed priority, comma-separated
    pub priority: Option<String>,
    /// Only messages matching all listed tags, comma-separated
    pub tags: Option<String>,
}

/// Blocking client that reads messages for one topic (or several,
/// comma-separated) from a ntfy server.
///
/// Authentication follows the same precedence as the publisher: bearer
/// wins when both bearer and basic credentials are given. The HTTP client
/// is created lazily on the first stream and released by
/// [`close`](Self::close); a later call simply re-creates it.
pub struct Subscriber {
    url: NtfyUrl,
    topic: String,
    auth: HeaderMap,
    filters: Filters,
    client: Option<Client>,
}

impl Subscriber {
    /// Create a subscriber for `topic` on the given server URL.
    pub fn new(
        ntfy_url: &str,
        topic: &str,
        basic: Option<BasicAuth>,
        bearer: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            url: NtfyUrl::parse(ntfy_url)?,
            topic: topic.to_string(),
            auth: auth_header(bearer, basic.as_ref())?,
            filters: Filters::default(),
            client: None,
        })
    }

    /// Attach server-side filters, replacing any previously set.
    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Open a long-lived event stream for the topic(s).
    ///
    /// Only the auth header is sent; filters apply to [`poll`](Self::poll).
    /// The stream stays open until the server or the caller drops it.
    pub fn subscribe(&mut self) -> Result<Messages> {
        let headers = self.auth.clone();
        self.stream(headers)
    }

    /// Fetch pending messages and return when the server has drained them.
    pub fn poll(&mut self) -> Result<Messages> {
        let mut headers = self.filter_headers()?;
        headers.insert("X-Poll", HeaderValue::from_static("1"));
        self.stream(headers)
    }

    /// Release the HTTP client. Calling `close` on an already closed
    /// subscriber is a no-op; a later `subscribe`/`poll` re-creates the
    /// client.
    pub fn close(&mut self) {
        self.client = None;
    }

    fn stream(&mut self, headers: HeaderMap) -> Result<Messages> {
        let url = self
            .url
            .unparse_with_topic(&format!("{}/json", self.topic));

        self.ensure_client()?;
        let client = self.client.as_ref().ok_or(Error::Closed)?;

        debug!("GET {url}");
        let response = client.get(url).headers(headers).send()?;

        let status = response.status();
        if !matches!(status.as_u16(), 200 | 201 | 202 | 206) {
            return Err(Error::UnexpectedStatus { status });
        }

        Ok(Messages {
            lines: BufReader::new(response).lines(),
        })
    }

    fn ensure_client(&mut self) -> Result<()> {
        if self.client.is_none() {
            self.client = Some(Client::builder().build()?);
        }
        Ok(())
    }

    fn filter_headers(&self) -> Result<HeaderMap> {
        let mut headers = self.auth.clone();

        if let Some(since) = &self.filters.since {
            insert_filter(&mut headers, "X-Since", since)?;
        }
        if let Some(scheduled) = self.filters.scheduled {
            let flag = if scheduled { "1" } else { "0" };
            headers.insert("X-Scheduled", HeaderValue::from_static(flag));
        }
        if let Some(message) = &self.filters.message {
            insert_filter(&mut headers, "X-Message", message)?;
        }
        if let Some(title) = &self.filters.title {
            insert_filter(&mut headers, "X-Title", title)?;
        }
        if let Some(id) = &self.filters.id {
            insert_filter(&mut headers, "X-ID", id)?;
        }
        if let Some(priority) = &self.filters.priority {
            insert_filter(&mut headers, "X-Priority", priority)?;
        }
        if let Some(tags) = &self.filters.tags {
            insert_filter(&mut headers, "X-Tags", tags)?;
        }

        Ok(headers)
    }
}

fn insert_filter(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidFilter { header: name })?;
    headers.insert(name, value);
    Ok(())
}

/// Iterator over messages decoded from one event stream.
///
/// Lines that fail to decode are logged and skipped; a read error on the
/// underlying stream ends the iterator.
pub struct Messages {
    lines: Lines<BufReader<Response>>,
}

impl Iterator for Messages {
    type Item = ReceivedMessage;

    fn next(&mut self) -> Option<ReceivedMessage> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str(&line) {
                        Ok(message) => return Some(message),
                        Err(err) => {
                            warn!("skipping undecodable event: {err}");
                        }
                    }
                }
                Err(err) => {
                    error!("event stream read failed: {err}");
                    return None;
                }
            }
        }
    }
}
