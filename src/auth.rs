//! Authentication header construction
//!
//! ntfy servers accept either token (`Bearer`) or basic authentication.
//! The header is computed once when a client is built; when both schemes
//! are configured, bearer wins.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::borrow::Cow;

use crate::errors::{Error, Result};

/// Basic authentication credentials
///
/// Either an already-base64-encoded `user:password` credential, or the
/// username and password themselves (encoded by this crate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasicAuth {
    /// Pre-encoded credential, sent as `Authorization: Basic <value>`
    Encoded(String),
    /// Username and password, joined with `:` and base64-encoded
    UserPass(String, String),
}

impl BasicAuth {
    /// Interpret a loose list of credential parts.
    ///
    /// One part is taken as a pre-encoded credential, two parts as a
    /// username/password pair. Any other arity fails with
    /// [`Error::InvalidCredentials`].
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Result<Self> {
        match parts {
            [encoded] => Ok(Self::Encoded(encoded.as_ref().to_string())),
            [username, password] => Ok(Self::UserPass(
                username.as_ref().to_string(),
                password.as_ref().to_string(),
            )),
            _ => Err(Error::invalid_credentials(format!(
                "expected 1 or 2 parts, got {}",
                parts.len()
            ))),
        }
    }

    fn encoded(&self) -> Cow<'_, str> {
        match self {
            Self::Encoded(value) => Cow::Borrowed(value),
            Self::UserPass(username, password) => {
                Cow::Owned(BASE64.encode(format!("{username}:{password}")))
            }
        }
    }
}

/// Build the Authorization header map for the given credentials.
///
/// Precedence: `bearer` beats `basic` when both are present. With neither
/// configured the returned map is empty and no header is sent.
pub(crate) fn auth_header(bearer: Option<&str>, basic: Option<&BasicAuth>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let value = match (bearer, basic) {
        (Some(token), _) => Some(format!("Bearer {token}")),
        (None, Some(basic)) => Some(format!("Basic {}", basic.encoded())),
        (None, None) => None,
    };

    if let Some(value) = value {
        let value = HeaderValue::from_str(&value)
            .map_err(|_| Error::invalid_credentials("value is not a valid header value"))?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
