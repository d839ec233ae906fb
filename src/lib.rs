//! staticd - Virtual-host static file server
//!
//! Core library: HTTP/1.1 subset parsing, virtual host resolution, and
//! per-connection lifecycle handling.

pub mod config;
pub mod http;
pub mod server;
pub mod vhost;
