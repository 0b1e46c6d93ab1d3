//! Markdown input handling
//!
//! Two concerns live here: dropping the document title before parsing, and the
//! comrak wrapper in [`parser`] that produces baseline HTML.
//!
//! # Title Line
//!
//! The page title on Confluence comes from the publish step, so a leading
//! level-1 heading would duplicate it. When the very first line starts with
//! `# ` it is removed together with its line separator. Nothing else is
//! touched: a heading further down, `## Sub`, or `#NoSpace` all survive.
//!
//! # As a Format
//!
//! [`MarkdownFormat`] renders the source after title stripping, which is
//! exactly what the parser will see. Useful when debugging a conversion.

pub mod parser;

use crate::format::{ConvertOptions, Format};

/// Remove a leading `# Title` line, returning the remainder unchanged.
pub fn strip_title(source: &str) -> &str {
    let (first, rest) = source.split_once('\n').unwrap_or((source, ""));
    if first.starts_with("# ") {
        rest
    } else {
        source
    }
}

/// Applies [`strip_title`] when the options ask for it.
pub fn prepare_source<'a>(source: &'a str, options: &ConvertOptions) -> &'a str {
    if options.strip_title {
        strip_title(source)
    } else {
        source
    }
}

/// Format implementation for the title-stripped Markdown source
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown source as handed to the parser (title line removed)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn render(&self, source: &str, options: &ConvertOptions) -> String {
        prepare_source(source, options).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_level_one_heading() {
        assert_eq!(strip_title("# My Doc\n\nHello\n"), "\nHello\n");
    }

    #[test]
    fn strips_only_the_first_line() {
        assert_eq!(
            strip_title("# Title\n# Second\nbody"),
            "# Second\nbody"
        );
    }

    #[test]
    fn title_only_document_becomes_empty() {
        assert_eq!(strip_title("# Title"), "");
        assert_eq!(strip_title("# Title\n"), "");
    }

    #[test]
    fn leaves_other_first_lines_alone() {
        for source in ["## Sub\nbody", "#NoSpace\nbody", "Intro\n# Late", " # Indented", ""] {
            assert_eq!(strip_title(source), source);
        }
    }

    #[test]
    fn crlf_separator_goes_with_the_title() {
        assert_eq!(strip_title("# Title\r\nbody\r\n"), "body\r\n");
    }

    #[test]
    fn prepare_source_honours_option() {
        let keep = ConvertOptions {
            strip_title: false,
            ..ConvertOptions::default()
        };
        assert_eq!(prepare_source("# T\nbody", &keep), "# T\nbody");
        assert_eq!(prepare_source("# T\nbody", &ConvertOptions::default()), "body");
    }
}
