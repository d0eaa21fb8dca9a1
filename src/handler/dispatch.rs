//! Response dispatch
//!
//! The state machine over the file matcher's outcome:
//!
//! 1. Matched `.md` file: render Markdown, wrap in the page template.
//! 2. Matched anything else: serve the bytes raw.
//! 3. No match: render `index.md` from the tenant root if present.
//! 4. Otherwise: hand the request to the generic directory server.
//!
//! Markdown is always tried before raw serving so `.md` sources never
//! escape as plain text, and the index fallback only runs after the whole
//! tenant tree came up empty, so an explicit file wins over the index.

use std::fs;
use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::{static_files, RequestContext};
use crate::http;
use crate::render::{render_markdown, render_page};
use crate::routing::{locate_file, normalize_request_path, resolve_tenant, MatchKind};

/// Resolve a request to a response, converting failures to error responses
///
/// All failures are logged with method-independent request context (host,
/// path, failing file) before the client response is built.
pub fn respond(state: &AppState, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    match try_respond(state, ctx) {
        Ok(response) => response,
        Err(err) => {
            state.logger.error(&format!(
                "{err} host={} path={} file={}",
                ctx.host,
                ctx.path,
                err.context_path().display()
            ));
            http::build_error_response(&err)
        }
    }
}

fn try_respond(
    state: &AppState,
    ctx: &RequestContext<'_>,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let tenant = resolve_tenant(&state.serve_root, ctx.host)?;
    let request_path = normalize_request_path(ctx.path);

    if let Some(found) = locate_file(&tenant.root, request_path)? {
        let kind = match found.kind {
            MatchKind::Exact => "exact",
            MatchKind::Stem => "extension-stripped",
        };
        state.logger.info(&format!(
            "Found requested file: {}/{} ({kind})",
            tenant.name,
            found.relative.display()
        ));
        if found.is_markdown() {
            return render_markdown_file(&found.path, &found.title(), ctx);
        }
        return static_files::serve_raw(&found.path, ctx);
    }

    let index = tenant.root.join("index.md");
    if index.is_file() {
        return render_markdown_file(&index, "index", ctx);
    }

    static_files::serve_fallback(state, &tenant.root, request_path, ctx)
}

/// Read a Markdown file and respond with the rendered page
fn render_markdown_file(
    path: &Path,
    title: &str,
    ctx: &RequestContext<'_>,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let bytes = fs::read(path).map_err(|source| ServeError::Render {
        path: path.to_path_buf(),
        source,
    })?;
    let fragment = render_markdown(&String::from_utf8_lossy(&bytes));
    let page = render_page(title, &fragment);
    Ok(http::build_html_response(page, ctx.is_head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testutil::{test_ctx, test_state};
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn serve_root_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (file, content) in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_markdown_rendered_for_stripped_path() {
        let root = serve_root_with(&[("acme/about.md", "# About\nHello")]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/about"));
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "text/html; charset=utf-8");

        let body = body_string(response).await;
        assert!(body.contains("<title>about</title>"));
        assert!(body.contains("<h1"));
        assert!(body.contains("About"));
        assert!(body.contains("Hello"));
    }

    #[tokio::test]
    async fn test_markdown_rendered_for_exact_path_too() {
        let root = serve_root_with(&[("acme/about.md", "# About\nHello")]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/about.md"));
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains("<h1"));
        assert!(!body.contains("# About"));
    }

    #[tokio::test]
    async fn test_nested_markdown_file() {
        let root = serve_root_with(&[("acme/docs/setup.md", "# Setup")]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/docs/setup"));
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains("<title>setup</title>"));
        assert!(body.contains("id=\"setup\""));
    }

    #[tokio::test]
    async fn test_non_markdown_served_raw() {
        let root = serve_root_with(&[("acme/data.json", r#"{"ok":true}"#)]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/data.json"));
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        assert_eq!(body_string(response).await, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_missing_tenant_is_404_naming_tenant() {
        let root = serve_root_with(&[("acme/about.md", "# About")]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("widgets.example.com", "/about"));
        assert_eq!(response.status(), 404);
        assert!(body_string(response).await.contains("widgets"));
    }

    #[tokio::test]
    async fn test_empty_tenant_is_404() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("hollow")).unwrap();
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("hollow.example.com", "/anything"));
        assert_eq!(response.status(), 404);
        assert!(body_string(response).await.contains("hollow"));
    }

    #[tokio::test]
    async fn test_index_fallback_for_unmatched_path() {
        let root = serve_root_with(&[
            ("acme/index.md", "# Welcome home"),
            ("acme/about.md", "# About"),
        ]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/no/such/page"));
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains("Welcome home"));
        assert!(body.contains("<title>index</title>"));
    }

    #[tokio::test]
    async fn test_explicit_file_wins_over_index() {
        let root = serve_root_with(&[
            ("acme/index.md", "# Welcome home"),
            ("acme/about.md", "# About page"),
        ]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/about"));
        let body = body_string(response).await;
        assert!(body.contains("About page"));
        assert!(!body.contains("Welcome home"));
    }

    #[tokio::test]
    async fn test_root_path_renders_index() {
        let root = serve_root_with(&[("acme/index.md", "# Welcome home")]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/"));
        assert_eq!(response.status(), 200);
        assert!(body_string(response).await.contains("Welcome home"));
    }

    #[tokio::test]
    async fn test_directory_fallback_without_index() {
        let root = serve_root_with(&[("acme/readme.txt", "plain")]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/"));
        assert_eq!(response.status(), 200);
        assert!(body_string(response).await.contains("readme.txt"));
    }

    #[tokio::test]
    async fn test_fallback_404_without_index() {
        let root = serve_root_with(&[("acme/readme.txt", "plain")]);
        let state = test_state(root.path());

        let response = respond(&state, &test_ctx("acme.example.com", "/missing"));
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let root = serve_root_with(&[("acme/about.md", "# About\nHello")]);
        let state = test_state(root.path());

        let first = body_string(respond(&state, &test_ctx("acme.example.com", "/about"))).await;
        let second = body_string(respond(&state, &test_ctx("acme.example.com", "/about"))).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_head_request_has_empty_body() {
        let root = serve_root_with(&[("acme/about.md", "# About")]);
        let state = test_state(root.path());

        let mut ctx = test_ctx("acme.example.com", "/about");
        ctx.is_head = true;
        let response = respond(&state, &ctx);
        assert_eq!(response.status(), 200);
        assert_ne!(response.headers()["Content-Length"], "0");
        assert!(body_string(response).await.is_empty());
    }
}
