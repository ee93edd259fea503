pub mod file_walker;
pub mod go_parser;
pub mod models;
pub mod syntax;

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::DocError;
use crate::output::schema::KnowledgeMap;
use crate::pattern;

use syntax::SourceParser;

pub const MARKER_FILE: &str = "go.mod";

const SYNTHETIC_MARKER: &str = "module tempmod\n\ngo 1.21\n";

/// How to find and filter the sources of a module.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Glob over absolute directory paths; only files inside matching
    /// directories contribute records.
    pub dir_filter: Option<String>,
    /// Write a minimal marker file into the root when none exists above it.
    pub allow_create_marker: bool,
}

/// Parse the module containing `root` and build the knowledge map.
pub fn load(
    root: &Path,
    options: &LoadOptions,
    parser: &dyn SourceParser,
) -> Result<KnowledgeMap, DocError> {
    let marker = match find_marker_up(root) {
        Some(path) => path,
        None if options.allow_create_marker => create_marker(root)?,
        None => {
            return Err(DocError::NoProjectMarker {
                root: root.to_path_buf(),
            });
        }
    };
    let module_dir = marker.parent().unwrap_or(Path::new("."));
    tracing::debug!(module = %module_dir.display(), "loading module");

    let files = parser.parse_module(module_dir)?;

    let mut map = KnowledgeMap::new();
    let mut files_used = 0usize;
    for file in &files {
        if let Some(filter) = options.dir_filter.as_deref().filter(|f| !f.is_empty()) {
            let dir = absolute_parent(&file.path);
            if !pattern::matches(&dir.to_string_lossy(), filter) {
                continue;
            }
        }
        files_used += 1;
        let found = models::collect_records(file, &mut map);
        tracing::debug!(file = %file.path.display(), package = %file.package, found, "collected types");
    }

    tracing::info!(
        files_parsed = files.len(),
        files_used,
        records = map.len(),
        "knowledge map built"
    );
    Ok(map)
}

/// Nearest marker file at or above `start`.
pub fn find_marker_up(start: &Path) -> Option<PathBuf> {
    let start = lexical_absolute(start)?;
    start
        .ancestors()
        .map(|dir| dir.join(MARKER_FILE))
        .find(|candidate| candidate.is_file())
}

/// Absolute form of `path` with `.` and `..` folded away without touching
/// the filesystem.
fn lexical_absolute(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path).ok()?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Some(normalized)
}

fn create_marker(root: &Path) -> Result<PathBuf, DocError> {
    let path = root.join(MARKER_FILE);
    fs::write(&path, SYNTHETIC_MARKER).map_err(|source| DocError::MarkerWrite {
        path: path.clone(),
        source,
    })?;
    tracing::warn!(path = %path.display(), "no go.mod found, created a temporary one");
    Ok(path)
}

fn absolute_parent(file: &Path) -> PathBuf {
    let dir = file.parent().unwrap_or(Path::new("."));
    std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}
