//! CDATA sections
//!
//! Code bodies are emitted as CDATA so Confluence shows them verbatim. Once a
//! body is inside a section, later rewrite passes must not see it, which is
//! what [`map_outside`] is for.

use std::borrow::Cow;

pub const OPEN: &str = "<![CDATA[";
pub const CLOSE: &str = "]]>";

/// Wrap raw text in a CDATA section.
///
/// A literal `]]>` in the text would end the section early, so it is split
/// across two adjacent sections. The concatenated section contents still equal
/// the input.
pub fn wrap(text: &str) -> String {
    format!("{OPEN}{}{CLOSE}", text.replace(CLOSE, "]]]]><![CDATA[>"))
}

/// Apply `pass` to every stretch of `input` outside CDATA sections.
///
/// Sections are copied through untouched. An unterminated section runs to the
/// end of the input.
pub fn map_outside<'a, F>(input: &'a str, pass: F) -> Cow<'a, str>
where
    F: Fn(&str) -> Cow<'_, str>,
{
    if !input.contains(OPEN) {
        return pass(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        output.push_str(&pass(&rest[..start]));
        let section = &rest[start..];
        let end = section[OPEN.len()..]
            .find(CLOSE)
            .map_or(section.len(), |i| OPEN.len() + i + CLOSE.len());
        output.push_str(&section[..end]);
        rest = &section[end..];
    }
    output.push_str(&pass(rest));
    Cow::Owned(output)
}
