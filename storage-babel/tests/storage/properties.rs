//! Property tests for the rewrite chain

use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;
use storage_babel::convert;
use storage_babel::formats::storage::xhtml::{clean_structure, close_void_elements};

static SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("section pattern"));

/// Concatenated contents of every CDATA section in `storage`.
fn cdata_text(storage: &str) -> String {
    SECTION
        .captures_iter(storage)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn html_fragments() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("<br>"),
            Just("<br/>"),
            Just("<br />"),
            Just("<hr>"),
            Just("<img src=\"a.png\">"),
            Just("<img src=\"b.png\" />"),
            Just("<input type=\"checkbox\" disabled=\"\">"),
            Just("<p>"),
            Just("</p>"),
            Just("text"),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn structure_fragments() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("<p>"),
            Just("</p>"),
            Just("<li>"),
            Just("</li>"),
            Just("<ul>"),
            Just("</ul>"),
            Just("</ol>"),
            Just("x"),
        ],
        0..32,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn closing_void_elements_is_idempotent(html in html_fragments()) {
        let once = close_void_elements(&html).into_owned();
        let twice = close_void_elements(&once).into_owned();
        prop_assert_eq!(twice, once.clone());
        prop_assert!(!once.contains("<br>"));
        prop_assert!(!once.contains("<hr>"));
    }

    #[test]
    fn structure_cleanup_leaves_no_fixable_sequence(html in structure_fragments()) {
        let cleaned = clean_structure(&html);
        for pattern in ["<p><p>", "</p></p>", "<p><li>", "</li></p>", "<p></ul>", "<p></ol>"] {
            prop_assert!(!cleaned.contains(pattern), "{} left in {}", pattern, cleaned);
        }
    }

    #[test]
    fn fenced_code_survives_verbatim(code in "[a-zA-Z0-9<>&;#\"' \\]=/]{0,40}") {
        let storage = convert(&format!("```rust\n{code}\n```\n"));
        prop_assert_eq!(cdata_text(&storage), format!("{code}\n"));
    }

    #[test]
    fn language_blocks_always_carry_language(language in "[a-z]{1,10}") {
        let storage = convert(&format!("```{language}\nx\n```\n\n    y\n"));
        let parameter = format!("<ac:parameter ac:name=\"language\">{language}</ac:parameter>");
        prop_assert_eq!(storage.matches("<ac:structured-macro").count(), 2);
        prop_assert_eq!(storage.matches(parameter.as_str()).count(), 1);
    }

    #[test]
    fn title_line_never_reaches_output(
        title in "Q[0-9]{3,6}",
        body in "[a-z ]{1,30}(\n[a-z ]{1,30}){0,3}",
    ) {
        let storage = convert(&format!("# {title}\n{body}\n"));
        prop_assert!(!storage.contains(&title));
        prop_assert_eq!(storage, convert(&format!("{body}\n")));
    }
}
