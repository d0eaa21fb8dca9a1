//! HTTP response builders
//!
//! Builders for the response shapes the dispatcher produces: rendered HTML
//! pages, raw files with ETag/Range support, and plain-text error bodies.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::error::ServeError;
use crate::http::range::ByteRange;
use crate::http::{cache, range};

/// Build a plain-text response with the given status code
pub fn build_plain_response(status: u16, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Build the client-facing response for a resolution failure
pub fn build_error_response(err: &ServeError) -> Response<Full<Bytes>> {
    build_plain_response(err.status(), err.to_string())
}

/// Build a 200 response carrying a rendered HTML document
pub fn build_html_response(html: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = html.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(html)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Build a 304 Not Modified response
pub fn build_not_modified_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Build the response for a raw file, honoring conditional and range headers
///
/// Produces 304 when the client's ETag still matches, 206 for a satisfiable
/// single range, 416 when the range lies outside the file, and a cached 200
/// otherwise.
pub fn build_static_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    range_header: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);
    if cache::etag_matches(if_none_match, &etag) {
        return build_not_modified_response(&etag);
    }

    match range::parse_range_header(range_header, data.len()) {
        ByteRange::Partial { start, end } => {
            let body = if is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };
            Response::builder()
                .status(206)
                .header("Content-Type", content_type)
                .header("Content-Length", end - start + 1)
                .header("Content-Range", format!("bytes {start}-{end}/{}", data.len()))
                .header("Accept-Ranges", "bytes")
                .header("ETag", etag)
                .header("Cache-Control", "public, max-age=3600")
                .body(Full::new(body))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
        }
        ByteRange::Unsatisfiable => Response::builder()
            .status(416)
            .header("Content-Type", "text/plain")
            .header("Content-Range", format!("bytes */{}", data.len()))
            .body(Full::new(Bytes::from("Range Not Satisfiable")))
            .unwrap_or_else(|_| Response::new(Full::new(Bytes::new()))),
        ByteRange::Full => {
            let body = if is_head {
                Bytes::new()
            } else {
                Bytes::from(data.to_owned())
            };
            Response::builder()
                .status(200)
                .header("Content-Type", content_type)
                .header("Content-Length", data.len())
                .header("Accept-Ranges", "bytes")
                .header("ETag", etag)
                .header("Cache-Control", "public, max-age=3600")
                .body(Full::new(body))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_response() {
        let resp = build_plain_response(404, "Site not found: widgets".to_string());
        assert_eq!(resp.status(), 404);
        assert_eq!(
            resp.headers()["Content-Type"],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_error_response_names_tenant() {
        let err = ServeError::TenantNotFound {
            tenant: "widgets".to_string(),
            root: PathBuf::from("public/widgets"),
        };
        let resp = build_error_response(&err);
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn test_html_response_head_has_no_body_but_full_length() {
        let resp = build_html_response("<html></html>".to_string(), true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "13");
    }

    #[test]
    fn test_static_response_sets_etag() {
        let resp = build_static_response(b"hello", "text/plain; charset=utf-8", None, None, false);
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().contains_key("ETag"));
        assert_eq!(resp.headers()["Accept-Ranges"], "bytes");
    }

    #[test]
    fn test_static_response_conditional_304() {
        let etag = cache::generate_etag(b"hello");
        let resp = build_static_response(b"hello", "text/plain", Some(&etag), None, false);
        assert_eq!(resp.status(), 304);
    }

    #[test]
    fn test_static_response_partial() {
        let resp = build_static_response(b"0123456789", "text/plain", None, Some("bytes=2-4"), false);
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 2-4/10");
        assert_eq!(resp.headers()["Content-Length"], "3");
    }

    #[test]
    fn test_static_response_unsatisfiable() {
        let resp = build_static_response(b"0123", "text/plain", None, Some("bytes=100-"), false);
        assert_eq!(resp.status(), 416);
    }
}
