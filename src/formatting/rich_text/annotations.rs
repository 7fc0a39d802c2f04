// src/formatting/rich_text/annotations.rs
//! Applying text styles as HTML or Markdown wrappers.

use super::types::TextStyle;
use crate::types::Annotations;

/// Converts model annotations to text style.
pub fn annotations_to_style(annotations: &Annotations) -> TextStyle {
    TextStyle {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
        color: annotations.color,
        link: None, // Links are handled separately
    }
}

/// Renderer for text styles to HTML.
pub struct HtmlStyleRenderer;

impl HtmlStyleRenderer {
    /// Escapes `content` and wraps it, innermost first: code, bold, italic,
    /// strikethrough, underline, color, link.
    pub fn apply_styles(content: &str, style: &TextStyle) -> String {
        let mut result = html_escape(content);

        if style.code {
            result = format!("<code>{}</code>", result);
        }

        if style.bold {
            result = format!("<strong>{}</strong>", result);
        }

        if style.italic {
            result = format!("<em>{}</em>", result);
        }

        if style.strikethrough {
            result = format!("<del>{}</del>", result);
        }

        if style.underline {
            result = format!("<u>{}</u>", result);
        }

        if !style.color.is_default() {
            let (name, hex) = (style.color.base_name(), style.color.hex());
            result = if style.color.is_background() {
                format!(
                    "<mark style=\"background-color: var(--notion-{}, #{})\">{}</mark>",
                    name, hex, result
                )
            } else {
                format!(
                    "<span style=\"color: var(--notion-{}, #{})\">{}</span>",
                    name, hex, result
                )
            };
        }

        if let Some(url) = &style.link {
            result = format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                escape_attribute(url),
                result
            );
        }

        result
    }
}

/// Renderer for text styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    pub fn apply_styles(content: &str, style: &TextStyle) -> String {
        if content.trim().is_empty() {
            return content.to_string();
        }

        let mut result = content.to_string();

        // Code first: the other markers must stay outside the backticks.
        if style.code {
            result = format!("`{}`", result);
        }

        if style.strikethrough {
            result = format!("~~{}~~", result);
        }

        if style.bold {
            result = format!("**{}**", result);
        }

        if style.italic {
            result = format!("*{}*", result);
        }

        // Underline requires HTML
        if style.underline {
            result = format!("<u>{}</u>", result);
        }

        if let Some(url) = &style.link {
            result = format!("[{}]({})", result, url);
        }

        result
    }
}

/// Escapes the three characters that change HTML structure. Quotes are
/// left alone in text content.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Makes a value safe inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}
