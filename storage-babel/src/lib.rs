//! Markdown to Confluence storage format
//!
//!     This crate converts Markdown documents into the XHTML dialect Confluence uses as its
//!     "storage" representation, and can publish the result as a draft page.
//!
//!     This is a pure lib, that is, it powers the md2storage cli but is shell agnostic: no code
//!     here supposes a shell environment, be it std print, env vars etc. Configuration comes in
//!     as plain values (see [`ConvertOptions`] and [`publish::ClientSettings`]).
//!
//! Pipeline
//!
//!     Markdown text
//!       → strip the leading `# Title` line      (formats/markdown)
//!       → comrak, GFM, raw HTML allowed         (formats/markdown/parser.rs)
//!       → baseline HTML                         (formats/html)
//!       → storage rewriter                      (formats/storage)
//!       → storage format text
//!
//!     Every step is a pure `&str → String` function with no shared state, so conversions can
//!     run repeatedly or in parallel without coordination.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait + ConvertOptions
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── export.rs               # render to memory or to a file
//!     ├── formats
//!     │   ├── markdown            # title stripping, comrak wrapper
//!     │   ├── html                # baseline HTML stage
//!     │   └── storage             # rewrite chain, code macro, CDATA, XML fix-ups
//!     └── publish                 # PageStore trait, REST client, draft titles
//!
//! Library Choices
//!
//!     We never write a Markdown parser. comrak does the parsing and HTML rendering; the storage
//!     rewriter works on its output with a short chain of regex passes (see
//!     formats/storage/mod.rs for the ordering rules). Entity decoding of code bodies is done by
//!     html-escape, HTTP by reqwest's blocking client.
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs                  # aggregates the subdirectories
//!     └── storage
//!         ├── convert.rs          # end-to-end Markdown → storage scenarios
//!         └── properties.rs       # proptest invariants of the rewrite chain
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.

pub mod error;
pub mod export;
pub mod format;
pub mod formats;
pub mod publish;
pub mod registry;

pub use error::{FormatError, PublishError};
pub use format::{ConvertOptions, Format};
pub use formats::markdown::parser::MarkdownOptions;
pub use registry::FormatRegistry;

/// Convert Markdown to storage format with the default options.
pub fn convert(markdown: &str) -> String {
    convert_with_options(markdown, &ConvertOptions::default())
}

/// Convert Markdown to storage format.
pub fn convert_with_options(markdown: &str, options: &ConvertOptions) -> String {
    formats::StorageFormat.render(markdown, options)
}

/// Baseline HTML for a Markdown source, before any storage rewriting.
pub fn to_html(markdown: &str, options: &ConvertOptions) -> String {
    formats::HtmlFormat.render(markdown, options)
}
