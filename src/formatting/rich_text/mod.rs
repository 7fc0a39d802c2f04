// src/formatting/rich_text/mod.rs
//! Rendering Notion rich text spans as inline HTML or Markdown.
//!
//! Spans are first turned into a [`FormattedText`] and then rendered.
//! Every span renders independently, so rendering a concatenation of
//! span lists equals concatenating their renderings.

mod annotations;
mod types;

pub use annotations::{escape_attribute, html_escape};
pub use types::{FormattedText, TextContent, TextSegment, TextStyle};

use crate::types::{RichTextItem, RichTextType};
use annotations::{annotations_to_style, HtmlStyleRenderer, MarkdownStyleRenderer};

/// Renders rich text spans as an inline HTML fragment.
pub fn render_rich_text(items: &[RichTextItem]) -> String {
    format_rich_text_items(items)
        .segments
        .iter()
        .map(render_segment_html)
        .collect()
}

/// Renders rich text spans as inline Markdown.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    format_rich_text_items(items)
        .segments
        .iter()
        .map(render_segment_markdown)
        .collect()
}

/// Concatenated visible text with no formatting.
pub fn plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

/// Formats rich text items into a structured representation.
pub fn format_rich_text_items(items: &[RichTextItem]) -> FormattedText {
    items
        .iter()
        .map(format_single_item)
        .filter(|segment| !segment.is_empty())
        .fold(FormattedText::new(), FormattedText::with_segment)
}

fn format_single_item(item: &RichTextItem) -> TextSegment {
    let mut style = annotations_to_style(&item.annotations);
    style.link = item.link_target().map(str::to_string);

    let content = match &item.text_type {
        RichTextType::Equation { .. } => TextContent::Equation(item.plain_text.clone()),
        RichTextType::Text { .. } | RichTextType::Mention { .. } => {
            TextContent::Plain(item.plain_text.clone())
        }
    };

    TextSegment { content, style }
}

fn render_segment_html(segment: &TextSegment) -> String {
    match &segment.content {
        TextContent::Plain(text) | TextContent::Equation(text) => {
            HtmlStyleRenderer::apply_styles(text, &segment.style)
        }
    }
}

fn render_segment_markdown(segment: &TextSegment) -> String {
    match &segment.content {
        TextContent::Plain(text) => MarkdownStyleRenderer::apply_styles(text, &segment.style),
        // Equations ignore styling
        TextContent::Equation(expression) => format!("${}$", expression),
    }
}
