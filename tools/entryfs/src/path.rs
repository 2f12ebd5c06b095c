use std::path::{Component, Path, PathBuf};

use crate::filesystem::{FileSystemError, Result};

/// Strips trailing separators, keeping a bare root intact.
///
/// Works on components rather than text, so names that are not valid UTF-8
/// survive untouched. Repeated separators and interior `.` are dropped too.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref().components().collect()
}

/// Joins a single child name onto `parent`.
///
/// The name must be exactly one normal component, so handles never escape
/// their directory.
pub fn child(parent: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(parent.join(name)),
        _ => Err(FileSystemError::InvalidName(name.to_string())),
    }
}

/// The directory containing `path`. A bare relative name lives in `.`.
pub fn parent(path: &Path) -> Option<PathBuf> {
    match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Some(PathBuf::from(".")),
        Some(p) => Some(p.to_path_buf()),
        None => None,
    }
}
