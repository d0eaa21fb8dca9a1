//! Tenant resolution from the Host header
//!
//! The first label of the request host names the tenant; the tenant root is
//! that name joined onto the configured serve root. Tenancy is derived from
//! the file system on every request, there is no registry to keep in sync.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ServeError;

/// A resolved tenant: its identifier and root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub name: String,
    pub root: PathBuf,
}

/// Extract the tenant identifier from a Host header value
///
/// Strips an optional `:port` suffix, then takes everything before the first
/// dot. A dotless host is its own identifier, so `localhost:8080` maps to
/// tenant `localhost`.
pub fn tenant_from_host(host: &str) -> &str {
    let host = host.split(':').next().unwrap_or(host);
    host.split('.').next().unwrap_or(host)
}

/// Resolve the tenant directory for a request host
///
/// Fails with `TenantNotFound` when the directory does not exist and with
/// `EmptyTenant` when it exists but holds no entries. Both short-circuit
/// before any file matching happens.
pub fn resolve_tenant(serve_root: &Path, host: &str) -> Result<Tenant, ServeError> {
    let name = tenant_from_host(host);

    // A host can't legitimately name a nested directory
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(ServeError::TenantNotFound {
            tenant: name.to_string(),
            root: serve_root.to_path_buf(),
        });
    }

    let root = serve_root.join(name);
    if !root.is_dir() {
        return Err(ServeError::TenantNotFound {
            tenant: name.to_string(),
            root,
        });
    }

    let mut entries = fs::read_dir(&root).map_err(|source| ServeError::Traversal {
        path: root.clone(),
        source,
    })?;
    if entries.next().is_none() {
        return Err(ServeError::EmptyTenant {
            tenant: name.to_string(),
            root,
        });
    }

    Ok(Tenant {
        name: name.to_string(),
        root,
    })
}
