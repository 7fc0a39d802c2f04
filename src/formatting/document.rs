// src/formatting/document.rs
//! Page-level composition: the persisted HTML body, the standalone HTML
//! document, and Markdown with a YAML frontmatter header.

use super::markdown::render_markdown_with_diagnostics;
use super::rich_text::html_escape;
use super::styles::page_stylesheet;
use crate::constants::DEFAULT_EXPORT_FILE_STEM;
use crate::error::AppError;
use crate::model::Block;
use chrono::NaiveDate;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;

const DOCUMENT_TEMPLATE_NAME: &str = "document";

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<meta name="description" content="{{description}}" />
<title>{{title}}</title>
</head>
<body style="max-width: 720px; margin: 2em auto; padding: 0 1em; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; line-height: 1.6; color: #37352f;">
<article>
{{{content}}}
</article>
</body>
</html>
"#;

/// Blog metadata carried with every export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub date: NaiveDate,
}

impl Frontmatter {
    /// File name for a download of this export, `{slug}.{extension}`.
    pub fn file_name(&self, extension: &str) -> String {
        let stem = if self.slug.is_empty() {
            DEFAULT_EXPORT_FILE_STEM
        } else {
            self.slug.as_str()
        };
        format!("{}.{}", stem, extension)
    }

    /// YAML header block including the `---` fences.
    pub fn to_yaml(&self) -> String {
        // JSON string literals are valid double-quoted YAML scalars.
        let quote = |value: &str| serde_json::Value::String(value.to_string()).to_string();
        format!(
            "---\ntitle: {}\ndescription: {}\nslug: {}\ndate: {}\n---\n",
            quote(&self.title),
            quote(&self.description),
            quote(&self.slug),
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Stylesheet, optional page icon, escaped title heading, then the body.
/// This is what gets persisted as an export's HTML.
pub fn compose_page_html(title: &str, icon: &str, body: &str) -> String {
    let mut html = page_stylesheet();
    html.push('\n');
    if !icon.is_empty() {
        html.push_str(&format!(
            "<div class=\"page-icon\" style=\"font-size:3em;margin-bottom:0.5em;\">{}</div>\n",
            icon
        ));
    }
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    html.push_str(body);
    html
}

/// Wraps composed page HTML into a standalone HTML5 document.
pub fn render_html_document(frontmatter: &Frontmatter, html_content: &str) -> Result<String, AppError> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(DOCUMENT_TEMPLATE_NAME, DOCUMENT_TEMPLATE)
        .map_err(|e| AppError::TemplateRenderError {
            name: DOCUMENT_TEMPLATE_NAME.to_string(),
            message: e.to_string(),
        })?;

    let data = json!({
        "title": frontmatter.title,
        "description": frontmatter.description,
        "content": html_content,
    });

    handlebars
        .render(DOCUMENT_TEMPLATE_NAME, &data)
        .map_err(|e| AppError::TemplateRenderError {
            name: DOCUMENT_TEMPLATE_NAME.to_string(),
            message: e.to_string(),
        })
}

/// Markdown artifact: frontmatter header, title heading, rendered blocks.
pub fn compose_markdown(blocks: &[Block], frontmatter: &Frontmatter) -> String {
    let body = render_markdown_with_diagnostics(blocks);
    for warning in &body.warnings {
        log::debug!("Markdown render warning: {}", warning);
    }
    format!(
        "{}\n# {}\n\n{}",
        frontmatter.to_yaml(),
        frontmatter.title,
        body.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frontmatter(slug: &str) -> Frontmatter {
        Frontmatter {
            title: "Ship \"it\"".to_string(),
            description: "A <short> post".to_string(),
            slug: slug.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        }
    }

    #[test]
    fn test_page_html_escapes_title_and_skips_empty_icon() {
        let html = compose_page_html("A & B", "", "<p>x</p>\n");
        assert!(html.starts_with("<style>"));
        assert!(html.ends_with("</style>\n<h1>A &amp; B</h1>\n<p>x</p>\n"));
        assert!(!html.contains("page-icon"));
    }

    #[test]
    fn test_page_html_with_icon() {
        let html = compose_page_html("Notes", "🚀", "");
        assert!(html.contains(
            "<div class=\"page-icon\" style=\"font-size:3em;margin-bottom:0.5em;\">🚀</div>\n<h1>Notes</h1>\n"
        ));
    }

    #[test]
    fn test_frontmatter_yaml_quotes_values() {
        assert_eq!(
            frontmatter("ship-it").to_yaml(),
            "---\ntitle: \"Ship \\\"it\\\"\"\ndescription: \"A <short> post\"\nslug: \"ship-it\"\ndate: 2026-03-14\n---\n"
        );
    }

    #[test]
    fn test_file_name_falls_back_to_export() {
        assert_eq!(frontmatter("ship-it").file_name("html"), "ship-it.html");
        assert_eq!(frontmatter("").file_name("md"), "export.md");
    }

    #[test]
    fn test_document_escapes_metadata_but_not_content() {
        let doc = render_html_document(&frontmatter("s"), "<p>body</p>").unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta name=\"description\" content=\"A &lt;short&gt; post\" />"));
        assert!(doc.contains("<article>\n<p>body</p>\n</article>"));
    }
}
