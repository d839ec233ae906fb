use crate::http::HTTP_VERSION;
use crate::http::mime;
use crate::http::request::Request;
use httpdate::fmt_http_date;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::SystemTime;

/// HTTP status codes this server can answer with.
///
/// - `Ok` (200): the target resolved to a readable file
/// - `BadRequest` (400): the request violated the grammar; always closes
///   the connection
/// - `NotFound` (404): unknown host, traversal escape, or missing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    /// ```
    pub fn reason_phrase(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Represents a response ready to be serialized to a client.
///
/// A success response carries the resolved file path; the body bytes are
/// read from it at write time. Non-200 responses never carry a body.
#[derive(Debug)]
pub struct Response {
    /// Protocol version on the status line
    pub version: &'static str,
    /// Status code of the response
    pub status: StatusCode,
    /// Response headers; serialization sorts the keys
    pub headers: HashMap<String, String>,
    /// File served as the body of a 200, `None` otherwise
    pub file_path: Option<PathBuf>,
}

impl Response {
    /// Builds a 200 response for a resolved file.
    ///
    /// Stats the file for Content-Length and Last-Modified; the window
    /// between this stat and the body read at write time is a documented
    /// race (the file may be deleted in between), surfaced as an IO error
    /// on whichever side hits it. Propagates the client's close request
    /// into a `Connection: close` header.
    pub async fn ok(req: &Request, file_path: PathBuf) -> std::io::Result<Self> {
        let meta = tokio::fs::metadata(&file_path).await?;

        let mut headers = HashMap::new();
        if req.close {
            headers.insert("Connection".to_string(), "close".to_string());
        }
        headers.insert("Content-Length".to_string(), meta.len().to_string());
        let ext = file_path.extension().and_then(|e| e.to_str());
        headers.insert(
            "Content-Type".to_string(),
            mime::content_type(ext).to_string(),
        );
        headers.insert("Date".to_string(), fmt_http_date(SystemTime::now()));
        headers.insert(
            "Last-Modified".to_string(),
            fmt_http_date(meta.modified()?),
        );

        Ok(Self {
            version: HTTP_VERSION,
            status: StatusCode::Ok,
            headers,
            file_path: Some(file_path),
        })
    }

    /// Builds a 400 response.
    ///
    /// Malformed requests always terminate the connection; there is no
    /// safe resynchronization point in the byte stream, so the close is
    /// unconditional.
    pub fn bad_request() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Connection".to_string(), "close".to_string());
        headers.insert("Date".to_string(), fmt_http_date(SystemTime::now()));

        Self {
            version: HTTP_VERSION,
            status: StatusCode::BadRequest,
            headers,
            file_path: None,
        }
    }

    /// Builds a 404 response, propagating the client's close request the
    /// same way a success does.
    pub fn not_found(req: &Request) -> Self {
        let mut headers = HashMap::new();
        if req.close {
            headers.insert("Connection".to_string(), "close".to_string());
        }
        headers.insert("Date".to_string(), fmt_http_date(SystemTime::now()));

        Self {
            version: HTTP_VERSION,
            status: StatusCode::NotFound,
            headers,
            file_path: None,
        }
    }

    /// Whether this response tells the client the connection will close.
    pub fn closes_connection(&self) -> bool {
        self.headers.get("Connection").is_some_and(|v| v == "close")
    }
}
