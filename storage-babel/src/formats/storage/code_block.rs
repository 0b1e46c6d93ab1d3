//! Code blocks → Confluence code macro
//!
//! Comrak renders fenced and indented code as `<pre><code>`, adding
//! `class="language-L"` when the fence has an info string. Both shapes become:
//!
//! ```text
//! <ac:structured-macro ac:name="code">
//!   <ac:parameter ac:name="language">L</ac:parameter>   (only with a language)
//!   <ac:plain-text-body><![CDATA[...]]></ac:plain-text-body>
//! </ac:structured-macro>
//! ```
//!
//! (emitted without the whitespace shown here). The body arrives entity-escaped
//! and is decoded before going into CDATA, since CDATA is not entity aware.
//!
//! The language rule runs first: a block that names a language never comes
//! out without its `language` parameter.

use super::cdata;
use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use tracing::trace;

static LANGUAGE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-([^"]+)">(.*?)</code></pre>"#)
        .expect("language block pattern")
});

static PLAIN_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").expect("plain block pattern"));

static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<code>(.*?)</code>").expect("inline code pattern"));

/// Build the code macro for an (entity-escaped) code body.
pub fn code_macro(language: Option<&str>, escaped_body: &str) -> String {
    let body = decode_html_entities(escaped_body);
    let mut out = String::from(r#"<ac:structured-macro ac:name="code">"#);
    if let Some(language) = language {
        out.push_str(r#"<ac:parameter ac:name="language">"#);
        out.push_str(language);
        out.push_str("</ac:parameter>");
    }
    out.push_str("<ac:plain-text-body>");
    out.push_str(&cdata::wrap(&body));
    out.push_str("</ac:plain-text-body></ac:structured-macro>");
    out
}

/// `<pre><code class="language-L">` blocks
pub fn convert_language_blocks(html: &str) -> Cow<'_, str> {
    LANGUAGE_BLOCK.replace_all(html, |caps: &Captures| code_macro(Some(&caps[1]), &caps[2]))
}

/// `<pre><code>` blocks without a language
pub fn convert_plain_blocks(html: &str) -> Cow<'_, str> {
    PLAIN_BLOCK.replace_all(html, |caps: &Captures| code_macro(None, &caps[1]))
}

/// Inline `<code>` is native to the storage format and stays byte-for-byte.
pub fn keep_inline_code(html: &str) -> Cow<'_, str> {
    let spans = INLINE_CODE.find_iter(html).count();
    if spans > 0 {
        trace!(spans, "inline code kept");
    }
    Cow::Borrowed(html)
}
