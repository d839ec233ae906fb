use crate::http::HTTP_VERSION;
use crate::http::request::{Method, Request, canonical_key};
use crate::vhost;
use bytes::{Buf, BytesMut};
use std::collections::HashMap;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Size of each blocking read issued while hunting for a line delimiter.
const READ_CHUNK: usize = 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequestLine,
    InvalidHeader,
    MissingHost,
    Encoding,
}

#[derive(Debug)]
pub enum LineError {
    /// Peer closed the stream before a full line arrived.
    Closed,
    /// The line was not valid UTF-8.
    Encoding,
    Io(std::io::Error),
}

/// Outcome of one request-read attempt, as dispatched on by the
/// connection state machine. A closed set of variants instead of
/// probing error identity.
#[derive(Debug)]
pub enum RequestError {
    /// Peer closed the stream; `pending` is true when a partial request
    /// was still buffered.
    Closed { pending: bool },
    /// Idle deadline expired before a full request arrived.
    TimedOut { pending: bool },
    /// The request violated the grammar or lacked a Host header.
    Malformed(ParseError),
    Io(std::io::Error),
}

/// Reads CRLF-terminated lines from a stream, carrying unconsumed bytes
/// across calls.
///
/// The buffer persists for the lifetime of a connection: bytes that
/// arrive after one request's final delimiter are the start of the next
/// request and must not be dropped.
pub struct LineReader {
    buf: BytesMut,
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
        }
    }

    /// True when undelimited bytes remain buffered, which lets the caller
    /// tell a clean close apart from a cut-off mid-request.
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Returns the next line without its CRLF delimiter.
    ///
    /// If the buffer already contains a full line no read occurs;
    /// otherwise bounded reads are issued until the delimiter appears or
    /// the stream ends. On error the accumulated bytes stay buffered.
    pub async fn next_line<S>(&mut self, stream: &mut S) -> Result<String, LineError>
    where
        S: AsyncRead + Unpin,
    {
        loop {
            if let Some(idx) = find_crlf(&self.buf) {
                let line = self.buf.split_to(idx);
                self.buf.advance(2);
                return String::from_utf8(line.to_vec()).map_err(|_| LineError::Encoding);
            }

            let mut chunk = [0u8; READ_CHUNK];
            let n = stream.read(&mut chunk).await.map_err(LineError::Io)?;
            if n == 0 {
                return Err(LineError::Closed);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Reads and validates one request from the stream.
///
/// Grammar: a start line of exactly three space-separated tokens
/// (`GET <path> HTTP/1.1`, path beginning with `/`), then header lines
/// until an empty line. Header keys are canonicalized; a Host header is
/// mandatory.
///
/// When the target names a directory under the matching document root, or
/// the path already ends in `/`, the default document name is appended to
/// the URL here, during parsing. Resolution afterwards operates on the
/// adjusted URL, and so does request logging.
pub async fn read_request<S>(
    stream: &mut S,
    lines: &mut LineReader,
    virtual_hosts: &HashMap<String, String>,
) -> Result<Request, RequestError>
where
    S: AsyncRead + Unpin,
{
    let start_line = lines
        .next_line(stream)
        .await
        .map_err(|e| on_line_error(e, lines))?;

    let fields: Vec<&str> = start_line.splitn(3, ' ').collect();
    if fields.len() != 3 {
        return Err(RequestError::Malformed(ParseError::InvalidRequestLine));
    }
    let method = Method::from_str(fields[0])
        .ok_or(RequestError::Malformed(ParseError::InvalidRequestLine))?;
    let mut url = fields[1].to_string();
    let version = fields[2].to_string();
    if !url.starts_with('/') || version != HTTP_VERSION {
        return Err(RequestError::Malformed(ParseError::InvalidRequestLine));
    }

    let mut headers = HashMap::new();
    loop {
        let line = lines
            .next_line(stream)
            .await
            .map_err(|e| on_line_error(e, lines))?;

        if line.is_empty() {
            break;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or(RequestError::Malformed(ParseError::InvalidHeader))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(RequestError::Malformed(ParseError::InvalidHeader));
        }
        headers.insert(canonical_key(key), value.trim().to_string());
    }

    let host = headers
        .get("Host")
        .cloned()
        .ok_or(RequestError::Malformed(ParseError::MissingHost))?;
    let close = headers.get("Connection").is_some_and(|v| v == "close");

    // Default-document substitution happens here, before resolution, so
    // the URL carried on the request is already the adjusted one.
    if let Some(doc_root) = virtual_hosts.get(&host) {
        let probe = vhost::join_under_root(Path::new(doc_root), &url);
        if let Ok(meta) = tokio::fs::metadata(&probe).await {
            if meta.is_dir() || url.ends_with('/') {
                if !url.ends_with('/') {
                    url.push('/');
                }
                url.push_str("index.html");
            }
        }
    }

    Ok(Request {
        method,
        url,
        version,
        headers,
        host,
        close,
    })
}

fn on_line_error(err: LineError, lines: &LineReader) -> RequestError {
    match err {
        LineError::Closed => RequestError::Closed {
            pending: lines.has_pending(),
        },
        LineError::Encoding => RequestError::Malformed(ParseError::Encoding),
        LineError::Io(e) => RequestError::Io(e),
    }
}
