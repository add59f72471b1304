//! Icon source discovery (pure, reads the filesystem only).

use std::io;
use std::path::{Path, PathBuf};

/// A vector-icon file found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    /// Path to the file on disk.
    pub path: PathBuf,
    /// Logical name: file name with the icon extension stripped.
    pub name: String,
}

impl IconSource {
    /// Build a source from a path if its extension is exactly `extension`.
    ///
    /// Dotfiles are never icons.
    ///
    /// # Examples
    /// ```ignore
    /// IconSource::from_path("icons/home.svg", "svg")    -> Some(name = "home")
    /// IconSource::from_path("icons/a.b.svg", "svg")     -> Some(name = "a.b")
    /// IconSource::from_path("icons/Logo.SVG", "svg")    -> None
    /// IconSource::from_path("icons/.hidden.svg", "svg") -> None
    /// ```
    pub fn from_path(path: impl Into<PathBuf>, extension: &str) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?;
        if file_name.starts_with('.') || path.extension()?.to_str()? != extension {
            return None;
        }
        let name = path.file_stem()?.to_str()?.to_string();
        Some(Self { path, name })
    }
}

/// List icon sources in `dir` (non-recursive), sorted by file name.
///
/// Subdirectories, dotfiles, files with another extension and non-UTF-8
/// file names are skipped. Sorting makes the processing order, and with it
/// the output, independent of the platform's directory listing order.
pub fn scan_icon_sources(dir: &Path, extension: &str) -> io::Result<Vec<IconSource>> {
    let mut sources: Vec<IconSource> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| IconSource::from_path(path, extension))
        .collect();

    sources.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(sources)
}
