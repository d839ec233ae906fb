//! Virtual host handling
//!
//! Maps a request's Host header and target path to a file inside the
//! matching document root.

pub mod resolver;

pub use resolver::{join_under_root, resolve};
