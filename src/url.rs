//! Internal URL handling for ntfy endpoints
//!
//! A base server URL is decomposed once at construction and reassembled on
//! every request, either as-is or with a topic segment appended to the
//! path. The stored path always ends with `/`, so appending a topic never
//! needs separator logic.

use url::Url;

use crate::errors::{Error, Result};

/// Immutable decomposition of a ntfy server URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NtfyUrl {
    scheme: String,
    authority: String,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl NtfyUrl {
    /// Parse a base URL and normalize its path to a trailing `/`.
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| Error::invalid_url(input, e))?;

        let mut path = url.path().to_string();
        if !path.ends_with('/') {
            path.push('/');
        }

        Ok(Self {
            scheme: url.scheme().to_string(),
            authority: url.authority().to_string(),
            path,
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        })
    }

    fn unparse_path(&self, path: &str) -> String {
        let mut out = format!("{}://{}{}", self.scheme, self.authority, path);
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }

    /// Reassemble the base URL.
    pub(crate) fn unparse(&self) -> String {
        self.unparse_path(&self.path)
    }

    /// Reassemble the base URL with `topic` appended to the path.
    ///
    /// The topic is concatenated verbatim; it must not carry a leading
    /// `/` and is not percent-encoded.
    pub(crate) fn unparse_with_topic(&self, topic: &str) -> String {
        self.unparse_path(&format!("{}{}", self.path, topic))
    }
}
