//! Cookie persistence of the selected seats.
//!
//! The selection is stored as a JSON array of seat ids under a single fixed
//! key, with an expiry one hour after the last write.

mod memory;
mod request;

pub use memory::MemoryCookieStore;
pub use request::RequestCookies;

use chrono::{DateTime, Duration, Utc};

use crate::error::RestoreError;
use crate::models::SelectionSet;

pub const SELECTION_COOKIE: &str = "selectedChairs";
pub const SELECTION_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
}

impl Cookie {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }

    /// `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        format!(
            "{}={}; Expires={}; Path={}",
            self.name,
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.path
        )
    }
}

/// Key/value cookie jar. Writing a cookie overwrites any previous value
/// under the same name; expired cookies read as absent.
pub trait CookieStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, cookie: Cookie);
}

impl<T: CookieStore + ?Sized> CookieStore for &mut T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&mut self, cookie: Cookie) {
        (**self).set(cookie)
    }
}

/// Codec between a [`SelectionSet`] and its cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCookie {
    name: String,
    ttl: Duration,
    path: String,
}

impl Default for SelectionCookie {
    fn default() -> Self {
        Self::new(SELECTION_COOKIE, Duration::seconds(SELECTION_TTL_SECS), "/")
    }
}

impl SelectionCookie {
    pub fn new(name: impl Into<String>, ttl: Duration, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ttl,
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn encode(&self, selection: &SelectionSet, now: DateTime<Utc>) -> Cookie {
        // Сериализация Vec<u32> не может упасть
        let value = serde_json::to_string(selection).unwrap_or_else(|_| "[]".to_string());
        Cookie {
            name: self.name.clone(),
            value,
            expires: now + self.ttl,
            path: self.path.clone(),
        }
    }

    pub fn decode(value: &str) -> Result<SelectionSet, RestoreError> {
        Ok(serde_json::from_str(value.trim())?)
    }

    pub fn restore(&self, store: &impl CookieStore) -> Result<SelectionSet, RestoreError> {
        let value = store.get(&self.name).ok_or(RestoreError::Missing)?;
        Self::decode(&value)
    }

    pub fn persist(&self, selection: &SelectionSet, store: &mut impl CookieStore) {
        store.set(self.encode(selection, Utc::now()));
    }
}
