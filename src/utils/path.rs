//! Path resolution helpers.

use std::path::{Path, PathBuf};

/// Resolve `path` against `base_dir` unless it is already absolute.
///
/// # Example
/// ```ignore
/// resolve_against(Path::new("assets/icons"), Path::new("/site")) -> "/site/assets/icons"
/// resolve_against(Path::new("/abs/icons"), Path::new("/site"))   -> "/abs/icons"
/// ```
#[inline]
pub fn resolve_against(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
