// Application state module
// Immutable per-process state shared across request handling tasks

use std::path::PathBuf;
use std::sync::Arc;

use crate::logger::Logger;

use super::types::Config;

/// Shared application state
///
/// Everything here is read-only after startup; request handling keeps no
/// cross-request mutable state, so no locking is involved.
pub struct AppState {
    pub config: Config,
    /// Resolved serve root all tenant directories live under
    pub serve_root: PathBuf,
    /// Injected logging capability
    pub logger: Arc<Logger>,
}

impl AppState {
    pub fn new(config: Config, logger: Arc<Logger>) -> Self {
        let serve_root = config.content.serve_root.clone();
        Self {
            config,
            serve_root,
            logger,
        }
    }
}
