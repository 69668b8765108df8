use crate::error::{CourseError, Result};
use std::path::Path;

fn map_io_error(e: std::io::Error, path: &Path) -> CourseError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => CourseError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => CourseError::from(e),
    }
}

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(e, path))?;
    }
    Ok(())
}

pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| map_io_error(e, path))?;
    }
    Ok(())
}
