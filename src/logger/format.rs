//! Access log entry formatting
//!
//! Two formats: `combined` (nginx-style, with the request host prepended
//! since routing is host-based) and `json`.

use chrono::Local;

/// One access log line worth of request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client socket address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// Host header the request carried (drives tenant routing)
    pub host: String,
    /// Tenant identifier derived from the host, when one exists
    pub tenant: Option<String>,
    pub method: String,
    pub path: String,
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// New entry stamped with the current time
    pub fn new(remote_addr: String, host: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            host,
            tenant: None,
            method,
            path,
            status: 200,
            body_bytes: 0,
            request_time_us: 0,
        }
    }

    /// Format the entry in the named format (`json` or combined-style)
    pub fn format(&self, format: &str) -> String {
        match format {
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    /// `host remote_addr - - [time] "METHOD /path" status bytes time`
    fn format_combined(&self) -> String {
        format!(
            "{} {} - - [{}] \"{} {}\" {} {} {:.3}s",
            self.host,
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.status,
            self.body_bytes,
            self.seconds(),
        )
    }

    fn format_json(&self) -> String {
        let tenant = self.tenant.as_ref().map_or_else(
            || "null".to_string(),
            |t| format!("\"{}\"", escape_json(t)),
        );
        format!(
            r#"{{"time":"{}","remote_addr":"{}","host":"{}","tenant":{},"method":"{}","path":"{}","status":{},"body_bytes":{},"request_time_us":{}}}"#,
            self.time.to_rfc3339(),
            escape_json(&self.remote_addr),
            escape_json(&self.host),
            tenant,
            escape_json(&self.method),
            escape_json(&self.path),
            self.status,
            self.body_bytes,
            self.request_time_us,
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn seconds(&self) -> f64 {
        self.request_time_us as f64 / 1_000_000.0
    }
}

/// Escape special characters for a JSON string value
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
