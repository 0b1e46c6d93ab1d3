//! Conversion export pipeline.
//!
//! Provides a high-level API for rendering a Markdown source to one of the
//! registered formats, either in memory or straight to a file. This bridges
//! the format registry and file I/O.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::FormatError;
use crate::format::ConvertOptions;
use crate::registry::FormatRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory converted pages are written to when no output path is given.
pub const DEFAULT_OUTPUT_DIR: &str = "confluence_output";

/// Suffix appended to the source file stem for converted pages.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_xhtml.txt";

/// Specifies how to export a document.
///
/// ```ignore
/// let spec = ExportSpec::new(&markdown, "storage")
///     .with_output_path("confluence_output/guide_xhtml.txt");
/// ```
///
/// If no output path is provided, the rendered text is returned in memory.
#[derive(Debug)]
pub struct ExportSpec<'a> {
    /// The Markdown source to convert.
    pub source: &'a str,
    /// Target format name ("storage", "html", "markdown").
    pub format: &'a str,
    /// Optional file path for writing output.
    pub output: Option<PathBuf>,
    /// Conversion options.
    pub options: ConvertOptions,
}

impl<'a> ExportSpec<'a> {
    /// Creates a new export specification for the given source and format.
    pub fn new(source: &'a str, format: &'a str) -> Self {
        Self {
            source,
            format,
            output: None,
            options: ConvertOptions::default(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }
}

/// The output from a successful export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportArtifact {
    /// Content held in memory (no output path given).
    InMemory(String),
    /// Path to the written file.
    File(PathBuf),
}

/// Result of an export operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    pub artifact: ExportArtifact,
}

/// Exports a document according to the specification.
///
/// Missing parent directories of the output path are created.
///
/// # Errors
///
/// Returns [`FormatError`] if the format is unknown or the file cannot be written.
pub fn export(spec: ExportSpec<'_>) -> Result<ExportResult, FormatError> {
    let registry = FormatRegistry::with_defaults();
    let text = registry.render(spec.source, spec.format, &spec.options)?;
    let artifact = match spec.output {
        Some(path) => ExportArtifact::File(write_to_path(path, &text)?),
        None => ExportArtifact::InMemory(text),
    };
    Ok(ExportResult { artifact })
}

/// Conventional location of the converted artifact for `input`:
/// `<dir>/<stem><suffix>`.
pub fn artifact_path(input: impl AsRef<Path>, dir: impl AsRef<Path>, suffix: &str) -> PathBuf {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.as_ref().join(format!("{stem}{suffix}"))
}

fn write_to_path(path: PathBuf, text: &str) -> Result<PathBuf, FormatError> {
    let io_error = |source| FormatError::Io {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(&path, text).map_err(io_error)?;
    info!(path = %path.display(), bytes = text.len(), "wrote converted document");
    Ok(path)
}
