//! Request handler module
//!
//! Entry point for HTTP request processing: extracts what the dispatcher
//! needs from the hyper request, times the request, and emits the access
//! log entry once a response exists.

pub mod dispatch;
pub mod static_files;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::logger::AccessLogEntry;
use crate::routing::tenant::tenant_from_host;

/// Request information the dispatcher works from
pub struct RequestContext<'a> {
    /// Host header value, empty when the client sent none
    pub host: &'a str,
    /// Raw URL path as received
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let host = req
        .headers()
        .get(hyper::header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.host())
        .unwrap_or("");

    state
        .logger
        .info(&format!("Received request: {method} {uri} host={host}"));

    let ctx = RequestContext {
        host,
        path: uri.path(),
        is_head: method == Method::HEAD,
        if_none_match: header_string(&req, "if-none-match"),
        range_header: header_string(&req, "range"),
    };

    let response = dispatch::respond(&state, &ctx);

    if state.logger.access_log_enabled() {
        let mut entry = AccessLogEntry::new(
            peer_addr.to_string(),
            host.to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        let tenant = tenant_from_host(host);
        if !tenant.is_empty() {
            entry.tenant = Some(tenant.to_string());
        }
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        state.logger.access(&entry);
    }

    Ok(response)
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::path::Path;
    use std::sync::Arc;

    use crate::config::{
        AppState, Config, ContentConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    };
    use crate::logger::{Level, Logger};

    use super::RequestContext;

    /// State over a temp serve root, logging errors only
    pub fn test_state(serve_root: &Path) -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            content: ContentConfig {
                serve_root: serve_root.to_path_buf(),
            },
            logging: LoggingConfig {
                level: "error".to_string(),
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
        };
        AppState::new(config, Arc::new(Logger::stderr_only(Level::Error)))
    }

    pub const fn test_ctx(host: &'static str, path: &'static str) -> RequestContext<'static> {
        RequestContext {
            host,
            path,
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }
}
