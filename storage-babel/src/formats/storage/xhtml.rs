//! Strict-XML fix-ups
//!
//! Confluence parses storage format as XML: void elements must be
//! self-closed, and it rejects paragraph tags wrapped around list items.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static VOID_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)<(area|base|br|col|embed|hr|img|input|link|meta|source|track|wbr)(\s[^>]*)?>",
    )
    .expect("void element pattern")
});

/// Literal replacements, applied in order until none matches.
const STRUCTURE_FIXUPS: &[(&str, &str)] = &[
    ("<p><p>", "<p>"),
    ("</p></p>", "</p>"),
    ("<p><li>", "<li>"),
    ("</li></p>", "</li>"),
    ("<p></ul>", "</ul>"),
    ("<p></ol>", "</ol>"),
];

/// Rewrite `<br>`, `<hr>`, `<img ...>` and friends to their self-closing form.
///
/// Attributes are copied unchanged. Tags that already end in `/>` are left as
/// they are, so running the pass twice changes nothing.
pub fn close_void_elements(html: &str) -> Cow<'_, str> {
    VOID_ELEMENT.replace_all(html, |caps: &Captures| {
        let attributes = caps.get(2).map_or("", |m| m.as_str());
        if attributes.trim_end().ends_with('/') {
            caps[0].to_string()
        } else {
            format!("<{}{}/>", &caps[1], attributes)
        }
    })
}

/// Drop paragraph tags that wrap list items or double up.
pub fn clean_structure(html: &str) -> Cow<'_, str> {
    if !has_structure_fixup(html) {
        return Cow::Borrowed(html);
    }

    let mut text = html.to_string();
    while has_structure_fixup(&text) {
        for (from, to) in STRUCTURE_FIXUPS {
            if text.contains(from) {
                text = text.replace(from, to);
            }
        }
    }
    Cow::Owned(text)
}

fn has_structure_fixup(text: &str) -> bool {
    STRUCTURE_FIXUPS.iter().any(|(from, _)| text.contains(from))
}
