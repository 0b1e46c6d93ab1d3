//! Confluence storage format
//!
//! Turns baseline HTML into the XHTML dialect Confluence stores pages in.
//!
//! # Rewrite Chain
//!
//! This is a fixed sequence of textual passes, not a tree transform. Each pass
//! is total: text a pattern does not match is left alone.
//!
//! | # | Pass                        | Effect                                                  |
//! |---|-----------------------------|---------------------------------------------------------|
//! | 1 | fenced code with language   | `<pre><code class="language-L">` → code macro + language |
//! | 2 | fenced code                 | `<pre><code>` → code macro                               |
//! | 3 | inline code                 | `<code>` kept as-is                                      |
//! | 4 | void elements               | `<br>` → `<br/>`, `<img ...>` → `<img .../>`, ...        |
//! | 5 | structure                   | drop `<p>` wrapped around `<li>` and doubled `<p>`       |
//!
//! Passes never look inside CDATA sections emitted by passes 1 and 2, so a code
//! sample containing `<br>` or `<pre><code>` reaches Confluence exactly as
//! written.
//!
//! # Known Limitations
//!
//! The structure pass only fixes adjacent tags. A loose list item rendered as
//! `<li>\n<p>text</p>\n</li>` keeps its paragraph. Well-formedness of the
//! document as a whole is never checked.

mod cdata;
pub mod code_block;
pub mod xhtml;

use crate::format::{ConvertOptions, Format};
use crate::formats::html::HtmlFormat;
use std::borrow::Cow;
use tracing::debug;

type Pass = for<'a> fn(&'a str) -> Cow<'a, str>;

const PASSES: [(&str, Pass); 5] = [
    ("fenced-code-language", code_block::convert_language_blocks),
    ("fenced-code", code_block::convert_plain_blocks),
    ("inline-code", code_block::keep_inline_code),
    ("void-elements", xhtml::close_void_elements),
    ("structure", xhtml::clean_structure),
];

/// Rewrite baseline HTML into storage format.
pub fn rewrite(html: &str) -> String {
    let mut current = html.to_string();
    for (name, pass) in PASSES {
        let rewritten = match cdata::map_outside(&current, pass) {
            Cow::Borrowed(_) => None,
            Cow::Owned(text) => Some(text),
        };
        match rewritten {
            Some(text) => {
                debug!(
                    pass = name,
                    before = current.len(),
                    after = text.len(),
                    "rewrite pass applied"
                );
                current = text;
            }
            None => debug!(pass = name, "rewrite pass matched nothing"),
        }
    }
    current
}

/// Format implementation for Confluence storage format
pub struct StorageFormat;

impl Format for StorageFormat {
    fn name(&self) -> &str {
        "storage"
    }

    fn description(&self) -> &str {
        "Confluence storage format (XHTML with ac: macros)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xhtml", "txt"]
    }

    fn render(&self, source: &str, options: &ConvertOptions) -> String {
        rewrite(&HtmlFormat.render(source, options))
    }
}
