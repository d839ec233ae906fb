use std::collections::HashMap;

/// HTTP request methods.
///
/// This server only serves static resources, so GET is the single
/// supported method. Anything else on the request line is rejected as a
/// malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string names a supported method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::Get));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::Get),
            _ => None,
        }
    }

    /// Returns the wire form of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Contains the request line fields and headers. The `url` field holds the
/// request target as it will be joined under the virtual host's document
/// root; when the target names a directory it has already had the default
/// document appended during parsing, so it may differ from the path the
/// client sent.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (always GET)
    pub method: Method,
    /// Request target path (e.g. "/index.html"), possibly adjusted for
    /// directory targets
    pub url: String,
    /// HTTP version (always "HTTP/1.1")
    pub version: String,
    /// Request headers with canonicalized keys
    pub headers: HashMap<String, String>,
    /// Value of the mandatory Host header
    pub host: String,
    /// Whether the client asked for the connection to be closed after the
    /// response ("Connection: close")
    pub close: bool,
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// Keys are stored canonicalized, so look-ups should use the canonical
    /// form (see [`canonical_key`]).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}

/// Canonicalizes a header key: the first letter of each hyphen-separated
/// word is upper-cased, the rest lowered, so "host", "HOST" and "Host" all
/// collide on "Host".
///
/// # Example
///
/// ```
/// # use staticd::http::request::canonical_key;
/// assert_eq!(canonical_key("content-length"), "Content-Length");
/// assert_eq!(canonical_key("HOST"), "Host");
/// ```
pub fn canonical_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut start_of_word = true;
    for ch in key.chars() {
        if start_of_word {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        start_of_word = ch == '-';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_multi_word() {
        assert_eq!(canonical_key("last-modified"), "Last-Modified");
        assert_eq!(canonical_key("X-forwarded-FOR"), "X-Forwarded-For");
    }

    #[test]
    fn canonical_key_preserves_hyphens() {
        assert_eq!(canonical_key("a--b"), "A--B");
    }
}
