//! Cookies and the outbound cookie queue.

use std::sync::Mutex;

/// An outbound cookie.
///
/// Wire encoding is the emission layer's concern; this is only the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Time to live, in minutes.
    pub ttl_minutes: u64,
    /// Cookie path.
    pub path: String,
    /// Cookie domain.
    pub domain: Option<String>,
    /// Whether the cookie is HTTPS-only.
    pub secure: bool,
    /// Whether the cookie is hidden from client-side scripts.
    pub http_only: bool,
}

impl Cookie {
    /// Create a cookie with defaults (path "/", no domain, not secure,
    /// not HTTP-only).
    pub fn new(name: impl Into<String>, value: impl Into<String>, ttl_minutes: u64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ttl_minutes,
            path: "/".to_string(),
            domain: None,
            secure: false,
            http_only: false,
        }
    }

    /// Set the path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the domain.
    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }

    /// Set the secure flag.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the HTTP-only flag.
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }
}

/// Queue of cookies awaiting delivery with the response.
pub trait CookieJar: Send + Sync {
    /// Build a cookie from its parts.
    #[allow(clippy::too_many_arguments)]
    fn make(
        &self,
        name: &str,
        value: &str,
        ttl_minutes: u64,
        path: &str,
        domain: Option<String>,
        secure: bool,
        http_only: bool,
    ) -> Cookie {
        Cookie::new(name, value, ttl_minutes)
            .with_path(path)
            .with_domain(domain)
            .with_secure(secure)
            .with_http_only(http_only)
    }

    /// Queue a cookie for outbound delivery.
    fn queue(&self, cookie: Cookie);
}

/// Cookie jar that records queued cookies in order.
#[derive(Default)]
pub struct MemoryCookieJar {
    queued: Mutex<Vec<Cookie>>,
}

impl MemoryCookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cookies queued so far, in order.
    pub fn queued(&self) -> Vec<Cookie> {
        self.queued.lock().expect("jar lock poisoned").clone()
    }
}

impl CookieJar for MemoryCookieJar {
    fn queue(&self, cookie: Cookie) {
        self.queued.lock().expect("jar lock poisoned").push(cookie);
    }
}
