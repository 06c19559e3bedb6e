use axum::http::{header, HeaderMap, HeaderValue};
use std::collections::HashMap;

use super::{Cookie, CookieStore};

/// Cookie jar scoped to one HTTP request: reads the request's `Cookie`
/// headers and collects writes as pending `Set-Cookie` values. Expiry is
/// left to the browser.
#[derive(Debug, Clone, Default)]
pub struct RequestCookies {
    incoming: HashMap<String, String>,
    outgoing: Vec<Cookie>,
}

impl RequestCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut incoming = HashMap::new();
        for value in headers.get_all(header::COOKIE) {
            let Ok(raw) = value.to_str() else {
                continue;
            };
            for pair in raw.split(';') {
                if let Some((name, value)) = pair.trim().split_once('=') {
                    // Первое вхождение имени выигрывает, как в document.cookie
                    incoming
                        .entry(name.trim().to_string())
                        .or_insert_with(|| value.trim().to_string());
                }
            }
        }
        Self {
            incoming,
            outgoing: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[Cookie] {
        &self.outgoing
    }

    /// Pending writes as `Set-Cookie` headers.
    pub fn set_cookie_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in &self.outgoing {
            match HeaderValue::from_str(&cookie.to_header_value()) {
                Ok(value) => {
                    headers.append(header::SET_COOKIE, value);
                }
                Err(e) => tracing::error!("Invalid cookie header for {}: {:?}", cookie.name, e),
            }
        }
        headers
    }
}

impl CookieStore for RequestCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.outgoing
            .iter()
            .rev()
            .find(|cookie| cookie.name == name)
            .map(|cookie| cookie.value.clone())
            .or_else(|| self.incoming.get(name).cloned())
    }

    fn set(&mut self, cookie: Cookie) {
        self.outgoing.retain(|pending| pending.name != cookie.name);
        self.outgoing.push(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_reads_named_entry_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; selectedChairs=[2,5]; lang=en"),
        );
        let cookies = RequestCookies::from_headers(&headers);
        assert_eq!(cookies.get("selectedChairs").as_deref(), Some("[2,5]"));
        assert_eq!(cookies.get("theme").as_deref(), Some("dark"));
        assert_eq!(cookies.get("missing"), None);
    }

    #[test]
    fn test_write_shadows_incoming_and_emits_single_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("selectedChairs=[1]"));
        let mut cookies = RequestCookies::from_headers(&headers);

        for value in ["[1,2]", "[1,2,3]"] {
            cookies.set(Cookie {
                name: "selectedChairs".to_string(),
                value: value.to_string(),
                expires: Utc::now() + Duration::hours(1),
                path: "/".to_string(),
            });
        }

        assert_eq!(cookies.get("selectedChairs").as_deref(), Some("[1,2,3]"));
        let out = cookies.set_cookie_headers();
        let values: Vec<_> = out.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(values.len(), 1);
        assert!(values[0].to_str().unwrap().starts_with("selectedChairs=[1,2,3]; Expires="));
    }
}
