//! Routing module
//!
//! Maps a request to a file on disk in two stages: the tenant submodule
//! turns the Host header into a tenant root directory, the locate submodule
//! searches that root for the file the request path names.

pub mod locate;
pub mod tenant;

pub use locate::{locate_file, normalize_request_path, Located, MatchKind};
pub use tenant::{resolve_tenant, tenant_from_host, Tenant};
