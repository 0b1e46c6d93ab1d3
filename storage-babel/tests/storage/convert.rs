//! End-to-end conversions (Markdown → storage format)

use insta::assert_snapshot;
use storage_babel::{convert, convert_with_options, to_html, ConvertOptions};

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture to exist")
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_title_is_dropped_and_paragraph_kept() {
    let storage = convert("# My Doc\n\nHello **world**.\n");

    assert_eq!(storage, "<p>Hello <strong>world</strong>.</p>\n");
    assert!(!storage.contains("My Doc"));
    assert!(!storage.contains("ac:structured-macro"));
}

#[test]
fn test_fenced_code_with_language() {
    let storage = convert("```python\nprint(\"hi\")\n```\n");

    assert_eq!(
        storage,
        "<ac:structured-macro ac:name=\"code\">\
         <ac:parameter ac:name=\"language\">python</ac:parameter>\
         <ac:plain-text-body><![CDATA[print(\"hi\")\n]]></ac:plain-text-body>\
         </ac:structured-macro>\n"
    );
}

#[test]
fn test_raw_void_elements_are_closed() {
    let storage = convert("line one<br>line two\n\n<hr>\n");

    assert!(storage.contains("line one<br/>line two"));
    assert!(storage.contains("<hr/>"));
    assert!(!storage.contains("<br>"));
    assert!(!storage.contains("<hr>"));
}

#[test]
fn test_lists_have_no_paragraph_wrappers() {
    let storage = convert("- one\n- two\n\n1. first\n2. second\n");

    assert!(storage.contains("<li>one</li>"));
    assert!(storage.contains("<ol>"));
    assert!(!storage.contains("<p>"));
}

// ============================================================================
// ELEMENT TESTS
// ============================================================================

#[test]
fn test_inline_code_is_native() {
    assert_snapshot!(
        convert("Use `a < b` now.\n").trim_end(),
        @"<p>Use <code>a &lt; b</code> now.</p>"
    );
}

#[test]
fn test_plain_fence_has_no_language_parameter() {
    let storage = convert("```\nx && y\n```\n");

    assert!(storage.contains("<![CDATA[x && y\n]]>"));
    assert!(!storage.contains("ac:parameter"));
}

#[test]
fn test_indented_code_block() {
    let storage = convert("Text\n\n    a <= b\n");

    assert!(storage.contains(
        "<ac:structured-macro ac:name=\"code\"><ac:plain-text-body><![CDATA[a <= b\n]]>"
    ));
}

#[test]
fn test_code_containing_cdata_terminator() {
    let storage = convert("```xml\n<![CDATA[x]]>\n```\n");

    assert!(storage.contains("<![CDATA[<![CDATA[x]]]]><![CDATA[>\n]]>"));
}

#[test]
fn test_entity_text_in_code_is_decoded_once() {
    let storage = convert("```\na &lt; b &copy; &#39; &amp;amp;\n```\n");

    assert!(storage.contains("<![CDATA[a &lt; b &copy; &#39; &amp;amp;\n]]>"));
}

#[test]
fn test_hard_line_breaks() {
    let storage = convert("first\nsecond\n");

    assert_eq!(storage, "<p>first<br />\nsecond</p>\n");
}

#[test]
fn test_markdown_image_untouched() {
    let storage = convert("![logo](logo.png)\n");

    assert_eq!(storage, "<p><img src=\"logo.png\" alt=\"logo\" /></p>\n");
}

#[test]
fn test_raw_image_is_self_closed() {
    let storage = convert("<img src=\"x.png\" alt=\"X\">\n");

    assert!(storage.contains("<img src=\"x.png\" alt=\"X\"/>"));
}

#[test]
fn test_raw_paragraph_wrapped_list_items() {
    let storage = convert("<ul>\n<p><li>a</li></p>\n<p></ul>\n");

    assert_eq!(storage, "<ul>\n<li>a</li>\n</ul>\n");
}

#[test]
fn test_only_first_heading_is_title() {
    let storage = convert("# Title\n# Another\n");

    assert_eq!(storage, "<h1>Another</h1>\n");
}

#[test]
fn test_title_kept_when_stripping_disabled() {
    let options = ConvertOptions {
        strip_title: false,
        ..ConvertOptions::default()
    };
    let storage = convert_with_options("# Title\n\nBody\n", &options);

    assert_eq!(storage, "<h1>Title</h1>\n<p>Body</p>\n");
}

#[test]
fn test_empty_document() {
    assert_eq!(convert(""), "");
    assert_eq!(convert("# Only a title"), "");
}

#[test]
fn test_baseline_html_keeps_pre_code() {
    let html = to_html("```sh\nls\n```\n", &ConvertOptions::default());

    assert_eq!(html, "<pre><code class=\"language-sh\">ls\n</code></pre>\n");
}

// ============================================================================
// KITCHENSINK
// ============================================================================

#[test]
fn test_kitchensink() {
    let storage = convert(&fixture("kitchensink.md"));

    assert!(!storage.contains("Kitchen Sink"));
    assert!(storage.contains("<h2>Lists</h2>"));
    assert!(storage.contains("<del>strike</del>"));
    assert!(storage.contains("<code>inline &lt; code</code>"));
    assert!(storage.contains("in the same paragraph"));
    assert!(storage.contains(
        "<ac:parameter ac:name=\"language\">python</ac:parameter>\
         <ac:plain-text-body><![CDATA[def greet(name):\n    return f\"<b>{name}</b> & co\"\n]]>"
    ));
    assert!(storage.contains("<![CDATA[indented = True\n]]>"));
    assert!(storage.contains("<![CDATA[plain fence\n]]>"));
    assert!(storage.contains("before<br/>after"));
    assert!(storage.contains("<hr/>"));
    assert!(storage.contains("<img src=\"diagram.png\" alt=\"Diagram\"/>"));
    assert!(storage.contains("<table>"));
    assert!(!storage.contains("<pre>"));
    assert_eq!(storage.matches("<ac:structured-macro").count(), 3);
}
