use chrono::Utc;
use std::collections::HashMap;

use super::{Cookie, CookieStore};

/// In-process cookie jar. Expiry is checked lazily on read.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    cookies: HashMap<String, Cookie>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry, expired or not.
    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .get(name)
            .filter(|cookie| !cookie.is_expired_at(Utc::now()))
            .map(|cookie| cookie.value.clone())
    }

    fn set(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn cookie(value: &str, expires_in: Duration) -> Cookie {
        Cookie {
            name: "selectedChairs".to_string(),
            value: value.to_string(),
            expires: Utc::now() + expires_in,
            path: "/".to_string(),
        }
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemoryCookieStore::new();
        store.set(cookie("[1]", Duration::hours(1)));
        store.set(cookie("[2]", Duration::hours(1)));
        assert_eq!(store.get("selectedChairs").as_deref(), Some("[2]"));
    }

    #[test]
    fn test_expired_cookie_reads_as_absent() {
        let mut store = MemoryCookieStore::new();
        store.set(cookie("[1]", Duration::seconds(-1)));
        assert_eq!(store.get("selectedChairs"), None);
        assert!(store.cookie("selectedChairs").is_some());
    }
}
