//! Session cookie handling.
//!
//! The device authenticates a session id that the client presents in the
//! `AIROS_SESSIONID` cookie. A fresh id is generated for every login; if the
//! device issues its own id through `Set-Cookie`, that one wins.

use std::fmt;

use http::HeaderMap;
use http::header::SET_COOKIE;
use rand::Rng;

/// Name of the session cookie understood by mPower firmware.
pub const SESSION_COOKIE: &str = "AIROS_SESSIONID";

/// Number of decimal digits in a generated session id.
const SESSION_ID_LEN: usize = 32;

/// An authenticated (or at least attempted) device session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
}

impl Session {
    /// Wrap an existing session id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Generate a random session id.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..SESSION_ID_LEN)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        Self { id }
    }

    /// Extract the session id the device set in its response, if any.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(parse_set_cookie)
            .map(Self::new)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.id)
    }
}

// The id authenticates the device session, keep it out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("id", &"<redacted>").finish()
    }
}

/// Pull the session id out of one `Set-Cookie` header value.
fn parse_set_cookie(value: &str) -> Option<String> {
    let pair = value.split(';').next()?;
    let (name, id) = pair.split_once('=')?;
    let id = id.trim().trim_matches('"');
    if name.trim() == SESSION_COOKIE && !id.is_empty() {
        Some(id.to_string())
    } else {
        None
    }
}
