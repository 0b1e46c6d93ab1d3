//! Format trait definition
//!
//! Every output a Markdown source can be rendered to is a [`Format`]. The three
//! built-in formats are the stages of the conversion pipeline (title-stripped
//! Markdown, baseline HTML, storage format), so any intermediate result can be
//! inspected through the same interface as the final one.

use crate::formats::markdown::parser::MarkdownOptions;

/// Options shared by every stage of the conversion pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Drop a leading `# Title` line before parsing
    pub strip_title: bool,
    /// Parser configuration
    pub markdown: MarkdownOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strip_title: true,
            markdown: MarkdownOptions::default(),
        }
    }
}

/// Trait for output formats
///
/// Rendering is a pure text-to-text function and cannot fail.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn render(&self, source: &str, _options: &ConvertOptions) -> String {
///         source.to_uppercase()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "storage", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for format detection from output filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Render Markdown source into this format
    fn render(&self, source: &str, options: &ConvertOptions) -> String;
}
