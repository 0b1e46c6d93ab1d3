//! Markdown parsing (Markdown → baseline HTML)
//!
//! Thin wrapper over comrak. The output is plain CommonMark/GFM HTML; everything
//! Confluence-specific happens afterwards in the storage rewriter.

use comrak::{markdown_to_html, ComrakOptions};

/// Parser switches exposed to configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Single newlines inside a paragraph become `<br />`
    pub hard_breaks: bool,
    /// Raw HTML in the source passes through unescaped
    pub unsafe_html: bool,
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            unsafe_html: true,
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

/// Render Markdown to HTML
pub fn to_html(source: &str, options: &MarkdownOptions) -> String {
    markdown_to_html(source, &comrak_options(options))
}

fn comrak_options(options: &MarkdownOptions) -> ComrakOptions<'static> {
    let mut comrak = ComrakOptions::default();
    comrak.extension.table = options.tables;
    comrak.extension.strikethrough = options.strikethrough;
    comrak.extension.autolink = options.autolink;
    comrak.extension.tasklist = options.tasklist;
    comrak.render.hardbreaks = options.hard_breaks;
    comrak.render.unsafe_ = options.unsafe_html;
    comrak
}
