//! Document root path resolution
//!
//! Joins a request target under a virtual host's document root and guards
//! against the path escaping it. The guard is a lexical prefix check on
//! the cleaned path: it stops `..` traversal through the join, but a
//! symlink inside a document root can still point outside it, and no
//! percent-decoding is applied. That is a deliberate scope limitation,
//! not an oversight.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Joins a request target under a document root, cleaning `.` and `..`
/// components lexically.
///
/// The target's leading `/` is dropped so that it nests under the root
/// rather than replacing it. `..` components pop across the join
/// boundary, which is exactly what the containment check in [`resolve`]
/// exists to catch.
pub fn join_under_root(root: &Path, url: &str) -> PathBuf {
    clean_path(&root.join(url.trim_start_matches('/')))
}

fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolves a request's Host header and target path to a filesystem path.
///
/// Returns `None` when the host is not configured, when the joined path
/// escapes the document root, or when the target fails the existence
/// probe. Any stat error counts as "not found"; the caller answers 404
/// either way.
pub async fn resolve(
    virtual_hosts: &HashMap<String, String>,
    host: &str,
    url: &str,
) -> Option<PathBuf> {
    let doc_root = virtual_hosts.get(host)?;
    let candidate = join_under_root(Path::new(doc_root), url);

    if !candidate.starts_with(doc_root) {
        tracing::warn!(host, url, "request target escapes document root");
        return None;
    }

    match tokio::fs::metadata(&candidate).await {
        Ok(_) => Some(candidate),
        Err(e) => {
            tracing::debug!(host, url, error = %e, "target failed existence probe");
            None
        }
    }
}
