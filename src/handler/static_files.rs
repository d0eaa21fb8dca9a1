//! Raw file serving and the directory fallback server
//!
//! Serves matched non-Markdown files with inferred Content-Type and cache
//! headers, and provides the last-resort fallback: generic static serving
//! rooted at the tenant directory, with an HTML directory listing.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::RequestContext;
use crate::http::{self, mime};
use crate::render::template;

/// Serve a file's bytes with Content-Type inferred from its extension
pub fn serve_raw(path: &Path, ctx: &RequestContext<'_>) -> Result<Response<Full<Bytes>>, ServeError> {
    let data = fs::read(path).map_err(|source| ServeError::Traversal {
        path: path.to_path_buf(),
        source,
    })?;
    let content_type = mime::content_type_for(path.extension().and_then(OsStr::to_str));
    Ok(http::build_static_response(
        &data,
        content_type,
        ctx.if_none_match.as_deref(),
        ctx.range_header.as_deref(),
        ctx.is_head,
    ))
}

/// Generic static serving rooted at the tenant directory
///
/// Resolves the request path under the root with a canonicalization guard,
/// then serves the file, a directory listing, or this server's own 404.
pub fn serve_fallback(
    state: &AppState,
    root: &Path,
    request_path: &str,
    ctx: &RequestContext<'_>,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let Ok(root_canonical) = root.canonicalize() else {
        return Ok(not_found());
    };

    let target = if request_path.is_empty() {
        root.to_path_buf()
    } else {
        root.join(request_path)
    };
    let Ok(target_canonical) = target.canonicalize() else {
        return Ok(not_found());
    };
    if !target_canonical.starts_with(&root_canonical) {
        state.logger.warn(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            target_canonical.display()
        ));
        return Ok(not_found());
    }

    if target_canonical.is_dir() {
        let page = directory_listing(request_path, &target_canonical)?;
        return Ok(http::build_html_response(page, ctx.is_head));
    }

    serve_raw(&target_canonical, ctx)
}

fn not_found() -> Response<Full<Bytes>> {
    http::build_plain_response(404, "404 Not Found".to_string())
}

/// Render a directory's entries as a styled HTML listing
fn directory_listing(request_path: &str, dir: &Path) -> Result<String, ServeError> {
    let entries = fs::read_dir(dir).map_err(|source| ServeError::Traversal {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ServeError::Traversal {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let mut list = String::from("<ul>\n");
    for name in &names {
        let href = if request_path.is_empty() {
            format!("/{name}")
        } else {
            format!("/{request_path}/{name}")
        };
        list.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            template::escape_html(&href),
            template::escape_html(name),
        ));
    }
    list.push_str("</ul>");

    let title = if request_path.is_empty() {
        "/"
    } else {
        request_path
    };
    Ok(template::render_page(title, &list))
}
