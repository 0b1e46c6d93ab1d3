//! Baseline HTML format
//!
//! The parser output before any Confluence rewriting. Comrak renders void
//! elements it generates itself as `<br />`, `<hr />` and `<img ... />`; raw
//! HTML from the source is copied verbatim, so bare `<br>` can still appear.

use crate::format::{ConvertOptions, Format};
use crate::formats::markdown::{parser, prepare_source};

/// Format implementation for baseline HTML
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "CommonMark/GFM HTML straight from the parser"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn render(&self, source: &str, options: &ConvertOptions) -> String {
        parser::to_html(prepare_source(source, options), &options.markdown)
    }
}
