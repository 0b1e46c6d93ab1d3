//! Format implementations
//!
//! One module per pipeline stage. Each stage renders from the original
//! Markdown source, running every earlier stage internally.

pub mod html;
pub mod markdown;
pub mod storage;

pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use storage::StorageFormat;
