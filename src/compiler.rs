//! Icon map compilation.
//!
//! # Pipeline
//!
//! ```text
//! source dir ──scan──► sorted sources ──extract (rayon)──► records
//!                                                            │
//!                                  fold, last name wins      ▼
//!                                                         IconMap ──► atomic write
//! ```
//!
//! Extraction of one file never depends on another, so records are built in
//! parallel and merged sequentially in source order. The output file is
//! written once, after every file has been processed.

use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::icon::{ExtractError, IconMap, IconRecord, IconSource, extract_icon, scan_icon_sources};
use crate::logger::ProgressLine;
use crate::utils::fs::write_atomic;
use crate::debug;

/// Default icon file extension.
pub const DEFAULT_EXTENSION: &str = "svg";

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a compile run. Nothing is written when one is returned.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("source directory `{0}` not found")]
    SourceDirectoryNotFound(PathBuf),

    #[error("failed to read source directory `{0}`")]
    SourceDirectoryUnreadable(PathBuf, #[source] io::Error),

    #[error("malformed icon `{path}`")]
    MalformedIcon {
        path: PathBuf,
        #[source]
        source: IconError,
    },

    #[error("failed to serialize icon map")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write `{0}`")]
    OutputWriteFailed(PathBuf, #[source] io::Error),
}

/// Why a single icon file could not be compiled.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to read file: {0}")]
    Read(#[source] io::Error),

    #[error("file is not valid UTF-8")]
    Encoding(#[source] std::string::FromUtf8Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

// ============================================================================
// Options & Report
// ============================================================================

/// Knobs for a compile run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Icon file extension, without the dot.
    pub extension: String,
    /// Abort on the first malformed icon instead of skipping it.
    pub strict: bool,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            strict: false,
            pretty: false,
        }
    }
}

/// An icon left out of the map.
#[derive(Debug)]
pub struct SkippedIcon {
    pub path: PathBuf,
    pub error: IconError,
}

/// Outcome of a successful compile run.
#[derive(Debug)]
pub struct CompileReport {
    /// Where the map was written.
    pub output: PathBuf,
    /// Number of entries in the written map.
    pub icons: usize,
    /// Files skipped because they could not be parsed.
    pub skipped: Vec<SkippedIcon>,
    /// Names that were defined by more than one file.
    pub overridden: Vec<String>,
}

// ============================================================================
// Compile
// ============================================================================

/// Compile every icon in `source` into a single JSON map at `output`.
///
/// Malformed icons are skipped and listed in the report unless
/// `options.strict` is set, in which case the first one (in source order)
/// fails the run. Any error leaves `output` untouched.
pub fn compile(
    source: &Path,
    output: &Path,
    options: &CompileOptions,
) -> Result<CompileReport, CompileError> {
    if !source.is_dir() {
        return Err(CompileError::SourceDirectoryNotFound(source.to_path_buf()));
    }

    let sources = scan_icon_sources(source, &options.extension)
        .map_err(|err| CompileError::SourceDirectoryUnreadable(source.to_path_buf(), err))?;
    debug!("icons"; "found {} in {}", sources.len(), source.display());

    let results = extract_all(&sources);
    let (map, skipped, overridden) = merge(sources, results, options.strict)?;

    let json = map.to_json(options.pretty)?;
    write_atomic(output, json.as_bytes())
        .map_err(|err| CompileError::OutputWriteFailed(output.to_path_buf(), err))?;

    Ok(CompileReport {
        output: output.to_path_buf(),
        icons: map.len(),
        skipped,
        overridden,
    })
}

/// Read and extract every source in parallel, keeping source order.
fn extract_all(sources: &[IconSource]) -> Vec<Result<IconRecord, IconError>> {
    let progress = ProgressLine::new("extract", sources.len());

    let results = sources
        .par_iter()
        .map(|source| {
            let result = compile_icon(&source.path);
            progress.inc();
            result
        })
        .collect();

    progress.finish();
    results
}

/// Compile a single icon file into its record.
pub fn compile_icon(path: &Path) -> Result<IconRecord, IconError> {
    let bytes = std::fs::read(path).map_err(IconError::Read)?;
    let content = String::from_utf8(bytes).map_err(IconError::Encoding)?;
    Ok(extract_icon(&content)?)
}

type Merged = (IconMap, Vec<SkippedIcon>, Vec<String>);

/// Fold extracted records into the map in source order.
fn merge(
    sources: Vec<IconSource>,
    results: Vec<Result<IconRecord, IconError>>,
    strict: bool,
) -> Result<Merged, CompileError> {
    let mut map = IconMap::new();
    let mut skipped = Vec::new();
    let mut overridden = Vec::new();

    for (source, result) in sources.into_iter().zip(results) {
        match result {
            Ok(record) => {
                debug!("icons"; "{} <- {}", source.name, source.path.display());
                if map.insert(source.name.clone(), record).is_some() {
                    overridden.push(source.name);
                }
            }
            Err(error) if strict => {
                return Err(CompileError::MalformedIcon {
                    path: source.path,
                    source: error,
                });
            }
            Err(error) => {
                skipped.push(SkippedIcon {
                    path: source.path,
                    error,
                });
            }
        }
    }

    Ok((map, skipped, overridden))
}
