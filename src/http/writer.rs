use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, StatusCode};

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers in sorted key order, so output is deterministic
    let mut keys: Vec<&String> = resp.headers.keys().collect();
    keys.sort();
    for k in keys {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(resp.headers[k].as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Serializes a response to wire format.
///
/// The body file is read at write time; if that read or any write fails
/// the serialization is abandoned and the error surfaces to the caller.
pub struct ResponseWriter {
    head: Vec<u8>,
    body_path: Option<std::path::PathBuf>,
    is_ok: bool,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            head: serialize_head(response),
            body_path: response.file_path.clone(),
            is_ok: response.status == StatusCode::Ok,
        }
    }

    /// The serialized status line and headers, exposed for inspection.
    pub fn head_bytes(&self) -> &[u8] {
        &self.head
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.head).await?;

        // Body bytes only on a success response
        if self.is_ok {
            if let Some(path) = &self.body_path {
                let body = tokio::fs::read(path).await?;
                stream.write_all(&body).await?;
            }
        }

        stream.flush().await
    }
}
