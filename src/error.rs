//! Request resolution error taxonomy
//!
//! Every failure on the request path maps to one of these variants, each of
//! which knows its HTTP status code and client-facing body. Failures are
//! logged with their file system context before a response is produced;
//! none are retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving a request to a file and serving it
#[derive(Debug, Error)]
pub enum ServeError {
    /// The tenant directory derived from the Host header does not exist
    #[error("Site not found: {tenant}")]
    TenantNotFound { tenant: String, root: PathBuf },

    /// The tenant directory exists but contains no entries
    #[error("No files found in site: {tenant}")]
    EmptyTenant { tenant: String, root: PathBuf },

    /// I/O failure while walking or reading the tenant tree
    #[error("Failed to read site content: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure while producing rendered Markdown output
    #[error("Failed to render document: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// HTTP status code for the client response
    pub const fn status(&self) -> u16 {
        match self {
            Self::TenantNotFound { .. } | Self::EmptyTenant { .. } => 404,
            Self::Traversal { .. } | Self::Render { .. } => 500,
        }
    }

    /// File system path involved in the failure, for log context
    pub fn context_path(&self) -> &std::path::Path {
        match self {
            Self::TenantNotFound { root, .. } | Self::EmptyTenant { root, .. } => root,
            Self::Traversal { path, .. } | Self::Render { path, .. } => path,
        }
    }
}
