// tests/html_rendering.rs
//! Block-to-HTML conversion through the public API.

mod common;

use common::*;
use notion2blog::formatting::render_rich_text;
use notion2blog::model::Block;
use notion2blog::types::{Annotations, Color, RichTextItem};
use notion2blog::{compose_markdown, compose_page_html, render_blocks, render_blocks_with_diagnostics, Frontmatter};
use pretty_assertions::assert_eq;

#[test]
fn heading_list_and_blank_paragraph() {
    let blocks = vec![
        heading1("Title"),
        bulleted("a"),
        bulleted("b"),
        paragraph(""),
    ];

    let html = render_blocks(&blocks);

    insta::assert_snapshot!(html, @r###"
    <h1 id="title">Title</h1>
    <ul>
    <li>a</li>
    <li>b</li>
    </ul>
    "###);
    assert!(!html.contains("<p>"));
}

/// Encodes a sibling sequence as letters: `B` bulleted, `N` numbered,
/// `P` paragraph.
fn sequence(pattern: &str) -> Vec<Block> {
    pattern
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            'B' => bulleted(&format!("b{}", i)),
            'N' => numbered(&format!("n{}", i)),
            _ => paragraph(&format!("p{}", i)),
        })
        .collect()
}

/// Maximal runs of `kind` in `pattern`.
fn runs_of(pattern: &str, kind: char) -> usize {
    let chars: Vec<char> = pattern.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|(i, c)| **c == kind && (*i == 0 || chars[i - 1] != kind))
        .count()
}

#[test]
fn one_list_element_per_maximal_run() {
    for pattern in ["B", "BBB", "BN", "BNB", "NNBBNN", "BPB", "PBBNPN", "NBNBNB", "PPP", ""] {
        let html = render_blocks(&sequence(pattern));

        assert_eq!(
            html.matches("<ul>").count(),
            runs_of(pattern, 'B'),
            "bulleted runs in {:?}",
            pattern
        );
        assert_eq!(
            html.matches("<ol>").count(),
            runs_of(pattern, 'N'),
            "numbered runs in {:?}",
            pattern
        );
        assert_eq!(
            html.matches("<li>").count(),
            pattern.chars().filter(|c| *c != 'P').count()
        );
    }
}

#[test]
fn interleaved_kinds_never_merge() {
    let html = render_blocks(&[bulleted("a"), numbered("one"), bulleted("b")]);
    assert_eq!(
        html,
        "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>one</li>\n</ol>\n<ul>\n<li>b</li>\n</ul>\n"
    );
}

#[test]
fn nested_list_items_render_inside_their_parent() {
    let blocks = vec![bulleted("parent").with_children(vec![numbered("child")])];
    assert_eq!(
        render_blocks(&blocks),
        "<ul>\n<li>parent<ol>\n<li>child</li>\n</ol>\n</li>\n</ul>\n"
    );
}

#[test]
fn heading_slugs() {
    assert_eq!(
        render_blocks(&[heading2("Hello, World!")]),
        "<h2 id=\"hello-world\">Hello, World!</h2>\n"
    );
    assert_eq!(render_blocks(&[heading2("!!!")]), "<h2 id=\"\">!!!</h2>\n");
}

#[test]
fn rich_text_rendering_is_concatenative() {
    let spans = vec![
        RichTextItem::plain_text("Read ").with_annotations(Annotations::bold()),
        RichTextItem::plain_text("the docs").with_link("https://example.com/?a=1&b=\"2\""),
        RichTextItem::plain_text(" now").with_annotations(Annotations::colored(Color::Red)),
    ];

    let whole = render_rich_text(&spans);
    let pieces: String = spans
        .iter()
        .map(|span| render_rich_text(std::slice::from_ref(span)))
        .collect();
    assert_eq!(whole, pieces);
}

#[test]
fn text_is_escaped_exactly_once() {
    assert_eq!(
        render_blocks(&[paragraph("<a & b>")]),
        "<p>&lt;a &amp; b&gt;</p>\n"
    );
}

#[test]
fn default_color_emits_no_wrapper() {
    let span = RichTextItem::plain_text("plain").with_annotations(Annotations::colored(Color::Default));
    assert_eq!(render_rich_text(&[span]), "plain");
}

#[test]
fn declared_but_empty_children_leave_no_wrapper() {
    let mut declared = paragraph("text");
    declared.common_mut().has_children = true;
    assert_eq!(render_blocks(&[declared]), render_blocks(&[paragraph("text")]));

    let mut toggle_declared = toggle("more");
    toggle_declared.common_mut().has_children = true;
    assert_eq!(
        render_blocks(&[toggle_declared]),
        "<details class=\"toggle\">\n<summary>more</summary>\n</details>\n"
    );
}

#[test]
fn table_with_header_row() {
    let html = render_blocks(&[table(
        true,
        &[&["Name", "Role"], &["Ada", "Engineer"], &["Grace", "Admiral"]],
    )]);

    insta::assert_snapshot!(html, @r###"
    <div class="table-container">
    <table>
    <thead>
    <tr>
    <th>Name</th>
    <th>Role</th>
    </tr>
    </thead>
    <tbody>
    <tr>
    <td>Ada</td>
    <td>Engineer</td>
    </tr>
    <tr>
    <td>Grace</td>
    <td>Admiral</td>
    </tr>
    </tbody>
    </table>
    </div>
    "###);
    assert_eq!(html.matches("<thead>").count(), 1);
    assert_eq!(html.matches("<tbody>").count(), 1);
}

#[test]
fn table_without_header_has_no_sections() {
    let html = render_blocks(&[table(false, &[&["a", "b"], &["c", "d"], &["e", "f"]])]);
    assert!(!html.contains("<thead>"));
    assert!(!html.contains("<tbody>"));
    assert_eq!(html.matches("<td>").count(), 6);
}

#[test]
fn header_only_table_has_no_body() {
    let html = render_blocks(&[table(true, &[&["Only", "Header"]])]);
    assert!(html.contains("<thead>\n<tr>\n<th>Only</th>"));
    assert!(!html.contains("tbody"));
}

#[test]
fn mixed_page_fragments() {
    let html = render_blocks(&[
        callout("Heads up", "⚠️", Color::Default),
        to_do("ship it", true),
        to_do("write docs", false),
        code("rust", "fn main() {}"),
        image("https://cdn.example.com/a.png"),
        divider(),
        child_page(""),
    ]);

    insta::assert_snapshot!(html, @r###"
    <aside class="callout callout-default">
    <span class="callout-icon">⚠️</span>
    <div class="callout-content">
    Heads up
    </div>
    </aside>
    <div class="todo-item"><input type="checkbox" checked disabled /><span>ship it</span></div>
    <div class="todo-item"><input type="checkbox" disabled /><span>write docs</span></div>
    <pre><code class="language-rust">fn main() {}</code></pre>
    <figure class="image-container">
    <img src="https://cdn.example.com/a.png" alt="Image from Notion" loading="lazy" />
    </figure>
    <hr />
    <div class="child-page"><a href="#">📄 Untitled</a></div>
    "###);
}

#[test]
fn runaway_nesting_is_cut_with_a_warning() {
    let outcome = render_blocks_with_diagnostics(&[nested_chain(80)]);

    assert!(outcome.html.contains("<p>level 10</p>"));
    assert!(!outcome.html.contains("<p>level 80</p>"));
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("render depth limit")));
}

#[test]
fn page_html_and_markdown_documents() {
    let blocks = vec![heading2("Intro"), paragraph("Hello **there**"), bulleted("one")];

    let html = compose_page_html("Launch <Plan>", "🚀", &render_blocks(&blocks));
    assert!(html.starts_with("<style>"));
    assert!(html.contains(
        "<div class=\"page-icon\" style=\"font-size:3em;margin-bottom:0.5em;\">🚀</div>\n<h1>Launch &lt;Plan&gt;</h1>\n<h2 id=\"intro\">"
    ));

    let frontmatter = Frontmatter {
        title: "Launch Plan".to_string(),
        description: "How we launch".to_string(),
        slug: "launch-plan".to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    };
    let markdown = compose_markdown(&blocks, &frontmatter);
    assert!(markdown.starts_with(
        "---\ntitle: \"Launch Plan\"\ndescription: \"How we launch\"\nslug: \"launch-plan\"\ndate: 2026-10-18\n---\n\n# Launch Plan\n\n"
    ));
    assert!(markdown.contains("## Intro"));
    assert!(markdown.contains("- one"));
}
