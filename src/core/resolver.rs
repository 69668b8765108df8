//! Maps request paths onto files under the content root.

use std::path::{Component, Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";

/// Resolves `request_path` to a path relative to `root`.
///
/// `/` becomes `index.html`. An extensionless path that names an existing
/// directory resolves to `<path>.html` when that file sits next to the
/// directory. Anything else comes back unchanged for the file server to find
/// or 404. Only existence checks touch the disk.
pub fn resolve_content_path(request_path: &str, root: &Path) -> PathBuf {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return PathBuf::from(INDEX_FILE);
    }

    let relative = PathBuf::from(trimmed.trim_end_matches('/'));
    if relative.extension().is_some() {
        return relative;
    }

    if !root.join(&relative).is_dir() {
        return relative;
    }

    let Some(name) = relative.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return relative;
    };

    let sibling = relative.with_file_name(format!("{name}.html"));
    if root.join(&sibling).is_file() {
        return sibling;
    }

    relative
}

/// True when `relative` stays inside the content root.
pub fn is_safe_relative(relative: &Path) -> bool {
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
