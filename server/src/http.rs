//! Minimal request/response model for the router.
//!
//! The router works on these plain types rather than `tiny_http`'s so
//! handlers can be exercised in tests without opening a socket; the
//! listener loop in `lib.rs` does the conversion at the edge.

use std::collections::HashMap;

/// Request method, reduced to what the route table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other,
}

/// An incoming request as the router sees it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Path only, query string stripped.
    pub path: String,
    pub body: String,
    pub cookies: HashMap<String, String>,
}

impl HttpRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            body: String::new(),
            cookies: HashMap::new(),
        }
    }

    pub fn post(path: &str, body: &str) -> Self {
        Self {
            method: Method::Post,
            path: path.to_string(),
            body: body.to_string(),
            cookies: HashMap::new(),
        }
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name.to_string(), value.to_string());
        self
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Decode the body as `application/x-www-form-urlencoded` fields.
    pub fn form(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Parse a `Cookie:` header value into name/value pairs.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// An outgoing response before conversion to the wire.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
}

impl HttpResponse {
    pub fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body,
            location: None,
            set_cookie: None,
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: value.to_string(),
            location: None,
            set_cookie: None,
        }
    }

    /// 303 See Other.
    pub fn redirect(to: &str) -> Self {
        Self {
            status: 303,
            content_type: "text/html; charset=utf-8",
            body: String::new(),
            location: Some(to.to_string()),
            set_cookie: None,
        }
    }

    pub fn with_set_cookie(mut self, cookie: String) -> Self {
        self.set_cookie = Some(cookie);
        self
    }
}
