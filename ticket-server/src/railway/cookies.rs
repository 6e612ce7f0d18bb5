//! Session cookie handling.
//!
//! The upstream ticket endpoint rejects bare requests; it expects the
//! session cookies a browser would have picked up from the landing page.
//! These helpers turn `Set-Cookie` response headers into a name→value jar
//! and back into a single `Cookie` request header.

use std::collections::BTreeMap;

/// Session cookies by name. Ordered so the formatted header is stable.
pub type CookieJar = BTreeMap<String, String>;

/// Parse `Set-Cookie` header values into a jar.
///
/// Only the leading `name=value` pair of each header is kept; attributes
/// (`Path`, `Expires`, …) are dropped. Malformed headers are ignored.
pub fn parse_set_cookies<'a>(headers: impl IntoIterator<Item = &'a str>) -> CookieJar {
    let mut jar = CookieJar::new();

    for header in headers {
        let pair = header.split(';').next().unwrap_or("");
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if !name.is_empty() && !value.is_empty() {
            jar.insert(name.to_string(), value.to_string());
        }
    }

    jar
}

/// Format a jar as a `Cookie` request header value.
pub fn format_cookie_header(jar: &CookieJar) -> String {
    jar.iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
