use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::Config;
use crate::http::parser::{self, LineReader, RequestError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::vhost;

/// How long a connection may sit idle before the server closes it. The
/// deadline covers one whole request read and is rearmed per request.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Connection {
    stream: TcpStream,
    lines: LineReader,
    config: Arc<Config>,
    idle_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingRequest,
    Responding(Request),
    Closing,
}

impl Connection {
    pub fn new(stream: TcpStream, config: Arc<Config>) -> Self {
        Self::with_idle_timeout(stream, config, IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(
        stream: TcpStream,
        config: Arc<Config>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            stream,
            lines: LineReader::new(),
            config,
            idle_timeout,
            state: ConnectionState::AwaitingRequest,
        }
    }

    /// Drives the connection until it closes.
    ///
    /// Every error is contained here: timeouts and peer closes end the
    /// connection silently, malformed requests get a 400, and write
    /// failures are logged before closing. Nothing propagates out.
    pub async fn run(mut self) {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closing) {
                ConnectionState::AwaitingRequest => {
                    self.state = self.await_request().await;
                }
                ConnectionState::Responding(req) => {
                    self.state = self.respond(req).await;
                }
                ConnectionState::Closing => break,
            }
        }
    }

    async fn await_request(&mut self) -> ConnectionState {
        let result = timeout(
            self.idle_timeout,
            parser::read_request(
                &mut self.stream,
                &mut self.lines,
                &self.config.virtual_hosts,
            ),
        )
        .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(_elapsed) => Err(RequestError::TimedOut {
                pending: self.lines.has_pending(),
            }),
        };

        match outcome {
            Ok(req) => ConnectionState::Responding(req),
            Err(RequestError::Closed { pending }) => {
                tracing::debug!(pending, "peer closed connection");
                ConnectionState::Closing
            }
            Err(RequestError::TimedOut { pending }) => {
                tracing::debug!(pending, "idle timeout, closing connection");
                ConnectionState::Closing
            }
            Err(RequestError::Malformed(e)) => {
                tracing::warn!(error = ?e, "malformed request");
                let response = Response::bad_request();
                if let Err(e) = self.send(&response).await {
                    tracing::error!(error = %e, "failed to write 400 response");
                }
                ConnectionState::Closing
            }
            Err(RequestError::Io(e)) => {
                tracing::warn!(error = %e, "read failed, closing connection");
                ConnectionState::Closing
            }
        }
    }

    async fn respond(&mut self, req: Request) -> ConnectionState {
        let response =
            match vhost::resolve(&self.config.virtual_hosts, &req.host, &req.url).await {
                Some(path) => match Response::ok(&req, path).await {
                    Ok(response) => response,
                    Err(e) => {
                        // The file passed the existence probe but vanished
                        // before the stat. Close without a response.
                        tracing::error!(url = %req.url, error = %e, "failed to stat resolved file");
                        return ConnectionState::Closing;
                    }
                },
                None => Response::not_found(&req),
            };

        // A write failure is logged and falls through to the closure
        // decision; it never takes the process down.
        if let Err(e) = self.send(&response).await {
            tracing::error!(error = %e, "failed to write response");
        }

        tracing::info!(
            method = req.method.as_str(),
            host = %req.host,
            url = %req.url,
            status = response.status.as_u16(),
            "request served"
        );

        if response.closes_connection() {
            ConnectionState::Closing
        } else {
            ConnectionState::AwaitingRequest
        }
    }

    async fn send(&mut self, response: &Response) -> std::io::Result<()> {
        let mut writer = ResponseWriter::new(response);
        writer.write_to_stream(&mut self.stream).await
    }
}
