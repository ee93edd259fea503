use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};

use crate::error::ParseError;

use super::MARKER_FILE;

/// Go sources belonging to the module at `module_dir`, in path order.
///
/// Ignore files are not consulted. Test files and files named with a leading
/// `_` or `.` are left out, as are directories the Go tool never loads as
/// packages (`testdata`, `vendor`, names starting with `.` or `_`) and nested
/// modules carrying their own marker file.
pub fn walk_module(module_dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(module_dir)
        .hidden(true)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .filter_entry(is_package_dir)
        .build();

    for entry in walker {
        let entry = entry.map_err(|source| ParseError::Walk {
            path: module_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if is_go_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_package_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_some_and(|ft| ft.is_dir()) || entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') || name.starts_with('_') || name == "testdata" || name == "vendor" {
        return false;
    }
    !entry.path().join(MARKER_FILE).is_file()
}

pub fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    path.extension().is_some_and(|ext| ext == "go")
        && !name.ends_with("_test.go")
        && !name.starts_with(['_', '.'])
}
