//! File matching within a tenant root
//!
//! Walks the tenant tree looking for the file whose relative path matches
//! the request path, either exactly or with the final extension stripped.
//! Matching is deterministic: entries are visited in lexical order, an
//! exact-path match always beats an extension-stripped one, and the walk
//! stops as soon as the winner is known.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ServeError;

/// How a file satisfied the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Relative path equaled the request path, extension included
    Exact,
    /// Relative path equaled the request path once its extension was removed
    Stem,
}

/// A file selected for the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Absolute path of the matched file
    pub path: PathBuf,
    /// Path relative to the tenant root
    pub relative: PathBuf,
    pub kind: MatchKind,
}

impl Located {
    /// Whether this file should go through the Markdown pipeline
    pub fn is_markdown(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    }

    /// File name without extension, used as the page title
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
    }
}

/// Strip leading and trailing slashes from a request URL path
pub fn normalize_request_path(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Search the tenant root for a file matching the normalized request path
///
/// Every non-directory entry is relativized against `root` and compared to
/// the request path. The walk is sorted by file name, so results do not
/// depend on platform directory order. An exact match terminates the walk
/// immediately; a stem match is remembered and only returned if no exact
/// match exists anywhere in the tree.
pub fn locate_file(root: &Path, request_path: &str) -> Result<Option<Located>, ServeError> {
    if request_path.is_empty() {
        return Ok(None);
    }
    let wanted = Path::new(request_path);

    let mut stem_match: Option<Located> = None;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            ServeError::Traversal {
                path,
                source: err.into(),
            }
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        // Relativize against the resolved tenant root, never a fixed prefix
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if relative == wanted {
            return Ok(Some(Located {
                relative: relative.to_path_buf(),
                path: entry.into_path(),
                kind: MatchKind::Exact,
            }));
        }

        if stem_match.is_none() && relative.with_extension("") == wanted {
            stem_match = Some(Located {
                relative: relative.to_path_buf(),
                path: entry.into_path(),
                kind: MatchKind::Stem,
            });
        }
    }

    Ok(stem_match)
}
