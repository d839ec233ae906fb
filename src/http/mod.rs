//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: GET
//! requests for static files, with keep-alive connections and a
//! per-connection idle timeout.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Reads CRLF-delimited lines from the socket and parses requests incrementally
//! - **`request`**: HTTP request representation and header canonicalization
//! - **`response`**: HTTP response representation with one constructor per status
//! - **`writer`**: Serializes responses with deterministic header ordering
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────────┐
//!        │ AwaitingRequest │ ← Idle timeout rearmed, read one request
//!        └──────┬──────────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │    Responding    │ ← Resolve path, build + write response
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → AwaitingRequest (same connection)
//!               └─ Close / timeout / EOF / malformed
//!               ▼
//!        ┌──────────────────┐
//!        │     Closing      │ ← Terminal, socket released
//!        └──────────────────┘
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

/// The only protocol version this server speaks, on both request and
/// status lines.
pub const HTTP_VERSION: &str = "HTTP/1.1";
