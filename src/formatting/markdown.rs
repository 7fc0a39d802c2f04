// src/formatting/markdown.rs
//! Block-to-Markdown conversion for the `.md` artifact.
//!
//! Follows the same structure as the HTML renderer: list runs are grouped
//! by the shared fold and numbered when the run is emitted. Constructs
//! Markdown has no syntax for (toggles, colored callouts) fall back to
//! inline HTML or blockquotes.

use super::renderer::{BlockRenderResult, BlockRenderer, RenderedSequence};
use super::rich_text::{plain_text, render_rich_text, rich_text_to_markdown};
use super::slug::slugify;
use super::state::{FormatContext, ListKind, ListRun};
use crate::model::*;
use crate::types::RichTextItem;
use std::cell::RefCell;

/// Renders a block sequence as Markdown.
pub fn render_markdown(blocks: &[Block]) -> String {
    render_markdown_with_diagnostics(blocks).content
}

/// Renders a block sequence as Markdown along with the warnings raised
/// anywhere beneath it.
pub fn render_markdown_with_diagnostics(blocks: &[Block]) -> RenderedSequence {
    MarkdownBlockRenderer::with_document_blocks(blocks)
        .render_sequence(blocks, &FormatContext::new())
}

/// Table of contents entry
#[derive(Debug, Clone)]
struct TocEntry {
    level: u8,
    text: String,
}

/// Formats Notion blocks as markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownBlockRenderer<'a> {
    /// All blocks in the document (for TOC generation)
    document_blocks: Option<&'a [Block]>,
}

impl<'a> MarkdownBlockRenderer<'a> {
    pub fn with_document_blocks(document_blocks: &'a [Block]) -> Self {
        Self {
            document_blocks: Some(document_blocks),
        }
    }
}

impl BlockRenderer for MarkdownBlockRenderer<'_> {
    fn render_block(&self, block: &Block, context: &FormatContext) -> BlockRenderResult {
        let warnings = RefCell::new(Vec::new());
        let collect = |rendered: RenderedSequence| {
            warnings.borrow_mut().extend(rendered.warnings);
            rendered.content
        };
        let children = || collect(self.render_children(block, context));

        let content = match block {
            Block::Paragraph(b) => {
                let text = rich_text_to_markdown(&b.content.rich_text);
                if text.trim().is_empty() {
                    children()
                } else {
                    format!("{}\n\n{}", text, children())
                }
            }
            Block::Heading1(b) => format_heading(1, b) + &children(),
            Block::Heading2(b) => format_heading(2, b) + &children(),
            Block::Heading3(b) => format_heading(3, b) + &children(),
            Block::BulletedListItem(b) => {
                return self.list_item(ListKind::Bulleted, &b.content, block, context)
            }
            Block::NumberedListItem(b) => {
                return self.list_item(ListKind::Numbered, &b.content, block, context)
            }
            Block::ToDo(b) => {
                let checkbox = if b.checked { "[x]" } else { "[ ]" };
                format!(
                    "- {} {}\n{}\n",
                    checkbox,
                    rich_text_to_markdown(&b.content.rich_text),
                    indent_block_content(&children(), "  ")
                )
            }
            Block::Toggle(b) => format!(
                "<details>\n<summary>{}</summary>\n\n{}</details>\n\n",
                render_rich_text(&b.content.rich_text),
                children()
            ),
            Block::Quote(b) => quote_lines(&format!(
                "{}\n\n{}",
                rich_text_to_markdown(&b.content.rich_text),
                children()
            )),
            Block::Callout(b) => {
                let emoji = match &b.icon {
                    Some(Icon::Emoji { emoji }) => format!("{} ", emoji),
                    _ => String::new(),
                };
                quote_lines(&format!(
                    "{}{}\n\n{}",
                    emoji,
                    rich_text_to_markdown(&b.content.rich_text),
                    children()
                ))
            }
            Block::Code(b) => format_code_block(b),
            Block::Divider(_) => "---\n\n".to_string(),
            Block::Equation(b) => format!("$$\n{}\n$$\n\n", b.expression),
            Block::Image(b) => {
                let alt = caption_or(&b.caption, "Image");
                format!("![{}]({})\n\n", alt, b.url())
            }
            Block::Video(b) => format!("[{}]({})\n\n", caption_or(&b.caption, "Video"), b.url()),
            Block::Audio(b) => format!("[{}]({})\n\n", caption_or(&b.caption, "Audio"), b.url()),
            Block::File(b) | Block::Pdf(b) => format!(
                "[📎 {}]({})\n\n",
                super::html::attachment_name(b),
                b.url()
            ),
            Block::Bookmark(b) | Block::Embed(b) => {
                format!("[{}]({})\n\n", caption_or(&b.caption, &b.url), b.url)
            }
            Block::LinkPreview(b) => format!("[{}]({})\n\n", b.url, b.url),
            Block::ChildPage(b) => format!("📄 **{}**\n\n", non_empty_or(&b.title, "Untitled")),
            Block::ChildDatabase(b) => {
                format!("📊 **{}**\n\n", non_empty_or(&b.title, "Database"))
            }
            Block::Table(_) => format_table(block.children()),
            Block::ColumnList(_) => block
                .children()
                .iter()
                .map(|column| collect(self.render_children(column, &context.descend())))
                .collect(),
            Block::Synced(b) => match (&b.synced_from, block.children().is_empty()) {
                (Some(source), true) => {
                    format!("<!-- synced block reference: {} -->\n\n", source.block_id)
                }
                _ => children(),
            },
            Block::TableOfContents(_) => self.generate_table_of_contents(),
            Block::Breadcrumb(_) => String::new(),
            Block::TableRow(_) | Block::Column(_) | Block::Unsupported(_) => {
                log::debug!("Rendering only the children of {} block", block.block_type());
                children()
            }
        };

        BlockRenderResult::fragment(content).with_warnings(warnings.into_inner())
    }

    fn render_list_run(&self, run: &ListRun) -> String {
        let mut result = run
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| match run.kind {
                ListKind::Bulleted => format!("- {}", item),
                ListKind::Numbered => format!("{}. {}", i + 1, item),
            })
            .collect::<String>();
        result.push('\n');
        result
    }
}

impl MarkdownBlockRenderer<'_> {
    /// Item body without its marker; the marker is added once the run is
    /// complete and the item's position is known.
    fn list_item(
        &self,
        kind: ListKind,
        content: &TextBlockContent,
        block: &Block,
        context: &FormatContext,
    ) -> BlockRenderResult {
        let children = self.render_children(block, context);
        let mut item = format!("{}\n", rich_text_to_markdown(&content.rich_text));
        if !children.is_empty() {
            item.push_str(&indent_block_content(children.content.trim_end(), "   "));
        }
        BlockRenderResult::list_item(kind, item).with_warnings(children.warnings)
    }

    /// Generate table of contents from document headings
    fn generate_table_of_contents(&self) -> String {
        let Some(blocks) = self.document_blocks else {
            return String::new();
        };

        let mut toc_entries = Vec::new();
        collect_headings_recursive(blocks, &mut toc_entries);
        if toc_entries.is_empty() {
            return String::new();
        }

        let mut result = String::new();
        for entry in toc_entries {
            let indent = "  ".repeat((entry.level as usize).saturating_sub(1));
            result.push_str(&format!(
                "{}- [{}](#{})\n",
                indent,
                entry.text,
                slugify(&entry.text)
            ));
        }
        result.push('\n');
        result
    }
}

/// Recursively collect headings from blocks
fn collect_headings_recursive(blocks: &[Block], toc_entries: &mut Vec<TocEntry>) {
    for block in blocks {
        let heading = match block {
            Block::Heading1(h) => Some((1, h)),
            Block::Heading2(h) => Some((2, h)),
            Block::Heading3(h) => Some((3, h)),
            _ => None,
        };
        if let Some((level, h)) = heading {
            let text = plain_text(&h.content.rich_text);
            if !text.trim().is_empty() {
                toc_entries.push(TocEntry {
                    level,
                    text: text.trim().to_string(),
                });
            }
        }

        collect_headings_recursive(block.children(), toc_entries);
    }
}

fn format_heading(level: u8, heading: &HeadingBlock) -> String {
    format!(
        "{} {}\n\n",
        "#".repeat(level as usize),
        rich_text_to_markdown(&heading.content.rich_text)
    )
}

/// Format code block with language
fn format_code_block(code: &CodeBlock) -> String {
    let lang = match code.language.as_str() {
        "plain text" => "",
        other => other,
    };

    let mut result = format!("```{}\n", lang);
    result.push_str(&plain_text(&code.content.rich_text));
    result.push_str("\n```\n");

    if !code.caption.is_empty() {
        result.push_str(&format!("*{}*\n", rich_text_to_markdown(&code.caption)));
    }
    result.push('\n');
    result
}

/// Pipe table; the first row doubles as the header row.
fn format_table(rows: &[Block]) -> String {
    let mut result = String::new();
    for (index, row) in rows.iter().enumerate() {
        let Block::TableRow(row) = row else { continue };

        result.push('|');
        for cell in &row.cells {
            let content = rich_text_to_markdown(cell).replace('|', "\\|");
            result.push_str(&format!(" {} |", content));
        }
        result.push('\n');

        if index == 0 {
            result.push('|');
            result.push_str(&" --- |".repeat(row.cells.len()));
            result.push('\n');
        }
    }
    if !result.is_empty() {
        result.push('\n');
    }
    result
}

fn caption_or(caption: &[RichTextItem], fallback: &str) -> String {
    if caption.is_empty() {
        fallback.to_string()
    } else {
        plain_text(caption)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Prefixes every line with `> `; the result ends with a blank line.
fn quote_lines(text: &str) -> String {
    let quoted = text
        .trim_end()
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    quoted + "\n\n"
}

/// Indents each non-empty line of `text` by `indent`, preserving blank lines.
fn indent_block_content(text: &str, indent: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}
