//! MIME type detection based on file extensions.

/// Returns the Content-Type for a file extension.
///
/// Unknown extensions fall back to `application/octet-stream`.
///
/// # Examples
/// ```
/// use staticd::http::mime::content_type;
/// assert_eq!(content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(content_type(Some("png")), "image/png");
/// assert_eq!(content_type(None), "application/octet-stream");
/// ```
pub fn content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",

        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",

        Some("pdf") => "application/pdf",

        _ => "application/octet-stream",
    }
}
