// src/formatting/html.rs
//! Block-to-HTML conversion.
//!
//! Each block type maps to a self-contained fragment. Rich text goes
//! through [`render_rich_text`]; children recurse through the shared
//! [`BlockRenderer`] fold, which also groups consecutive list items into
//! one `<ul>`/`<ol>` per run.

use super::renderer::{BlockRenderResult, BlockRenderer, RenderedSequence};
use super::rich_text::{escape_attribute, html_escape, plain_text, render_rich_text};
use super::slug::slugify;
use super::state::{FormatContext, ListKind, ListRun};
use crate::constants::{DEFAULT_CALLOUT_ICON, DEFAULT_IMAGE_ALT, UNTITLED_PAGE};
use crate::model::{
    Block, CalloutBlock, ChildBlock, CodeBlock, HeadingBlock, Icon, LinkBlock, MediaBlock,
    SyncedBlock, TableBlock, TextBlockContent,
};
use crate::types::{RichTextItem, Warning, WarningLevel};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Write;

lazy_static! {
    static ref YOUTUBE_VIDEO_ID: Regex =
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&]+)")
            .expect("YouTube id regex is valid");
}

/// Rendered HTML fragment and the non-fatal diagnostics gathered on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutcome {
    pub html: String,
    pub warnings: Vec<Warning>,
}

/// Renders a block sequence into an HTML fragment.
pub fn render_blocks(blocks: &[Block]) -> String {
    render_blocks_with_diagnostics(blocks).html
}

/// Renders a block sequence, keeping the diagnostics for callers that
/// report them.
pub fn render_blocks_with_diagnostics(blocks: &[Block]) -> RenderOutcome {
    log::debug!("Rendering {} top-level blocks as HTML", blocks.len());

    let RenderedSequence { content, warnings } =
        HtmlBlockRenderer.render_sequence(blocks, &FormatContext::new());

    RenderOutcome {
        html: content,
        warnings,
    }
}

/// Formats Notion blocks as HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBlockRenderer;

impl BlockRenderer for HtmlBlockRenderer {
    fn render_block(&self, block: &Block, context: &FormatContext) -> BlockRenderResult {
        match block {
            Block::Paragraph(b) => self.paragraph(block, &b.content, context),
            Block::Heading1(b) => self.heading(1, block, b, context),
            Block::Heading2(b) => self.heading(2, block, b, context),
            Block::Heading3(b) => self.heading(3, block, b, context),
            Block::BulletedListItem(b) => {
                self.list_item(ListKind::Bulleted, block, &b.content, context)
            }
            Block::NumberedListItem(b) => {
                self.list_item(ListKind::Numbered, block, &b.content, context)
            }
            Block::ToDo(b) => {
                let checked = if b.checked { "checked " } else { "" };
                let mut html = format!(
                    "<div class=\"todo-item\"><input type=\"checkbox\" {}disabled /><span>{}</span></div>\n",
                    checked,
                    render_rich_text(&b.content.rich_text)
                );
                let children = self.render_children(block, context);
                if !children.is_empty() {
                    let _ = writeln!(html, "<div class=\"indent\">{}</div>", children.content);
                }
                BlockRenderResult::fragment(html).with_warnings(children.warnings)
            }
            Block::Toggle(b) => {
                let mut html = format!(
                    "<details class=\"toggle\">\n<summary>{}</summary>\n",
                    render_rich_text(&b.content.rich_text)
                );
                let children = self.render_children(block, context);
                if !children.is_empty() {
                    let _ = writeln!(
                        html,
                        "<div class=\"toggle-content\">{}</div>",
                        children.content
                    );
                }
                html.push_str("</details>\n");
                BlockRenderResult::fragment(html).with_warnings(children.warnings)
            }
            Block::Callout(b) => self.callout(block, b, context),
            Block::Quote(b) => {
                let children = self.render_children(block, context);
                BlockRenderResult::fragment(format!(
                    "<blockquote>{}{}</blockquote>\n",
                    render_rich_text(&b.content.rich_text),
                    children.content
                ))
                .with_warnings(children.warnings)
            }
            Block::Code(b) => BlockRenderResult::fragment(code_block(b)),
            Block::Image(b) => BlockRenderResult::fragment(image(b)),
            Block::Video(b) => BlockRenderResult::fragment(video(b)),
            Block::Audio(b) => BlockRenderResult::fragment(audio(b)),
            Block::File(b) | Block::Pdf(b) => BlockRenderResult::fragment(file_attachment(b)),
            Block::Embed(b) | Block::Bookmark(b) => BlockRenderResult::fragment(bookmark(b)),
            Block::Divider(_) => BlockRenderResult::fragment("<hr />\n"),
            Block::Table(b) => BlockRenderResult::fragment(table(block, b)),
            Block::ColumnList(_) => self.column_list(block, context),
            Block::Synced(b) => self.synced(block, b, context),
            Block::ChildPage(b) => BlockRenderResult::fragment(child_page(b)),
            Block::ChildDatabase(b) => BlockRenderResult::fragment(child_database(b)),
            Block::Equation(b) => BlockRenderResult::fragment(format!(
                "<div class=\"equation\">{}</div>\n",
                html_escape(&b.expression)
            )),
            Block::LinkPreview(b) => BlockRenderResult::fragment(format!(
                "<div class=\"link-preview\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></div>\n",
                escape_attribute(&b.url),
                html_escape(&b.url)
            )),
            Block::TableOfContents(_) => BlockRenderResult::fragment(
                "<nav class=\"table-of-contents\"><p><em>[Table of Contents]</em></p></nav>\n",
            ),
            Block::Breadcrumb(_) => BlockRenderResult::fragment(
                "<nav class=\"breadcrumb\"><p><em>[Breadcrumb]</em></p></nav>\n",
            ),
            Block::TableRow(_) | Block::Column(_) | Block::Unsupported(_) => {
                self.children_only(block, context)
            }
        }
    }

    fn render_list_run(&self, run: &ListRun) -> String {
        let tag = run.kind.html_tag();
        let items: Vec<&str> = run.items.iter().map(String::as_str).collect();
        format!("<{tag}>\n{}\n</{tag}>\n", items.join("\n"))
    }
}

impl HtmlBlockRenderer {
    // --- Block-type formatters ---

    fn paragraph(
        &self,
        block: &Block,
        content: &TextBlockContent,
        context: &FormatContext,
    ) -> BlockRenderResult {
        let text = render_rich_text(&content.rich_text);
        if text.trim().is_empty() && block.children().is_empty() {
            return BlockRenderResult::fragment(String::new());
        }

        let mut html = format!("<p>{}</p>\n", text);
        let children = self.render_children(block, context);
        if !block.children().is_empty() {
            let _ = writeln!(html, "<div class=\"indent\">{}</div>", children.content);
        }
        BlockRenderResult::fragment(html).with_warnings(children.warnings)
    }

    fn heading(
        &self,
        level: u8,
        block: &Block,
        heading: &HeadingBlock,
        context: &FormatContext,
    ) -> BlockRenderResult {
        let slug = slugify(&plain_text(&heading.content.rich_text));
        let children = self.render_children(block, context);
        BlockRenderResult::fragment(format!(
            "<h{level} id=\"{}\">{}</h{level}>\n{}",
            slug,
            render_rich_text(&heading.content.rich_text),
            children.content
        ))
        .with_warnings(children.warnings)
    }

    fn list_item(
        &self,
        kind: ListKind,
        block: &Block,
        content: &TextBlockContent,
        context: &FormatContext,
    ) -> BlockRenderResult {
        let children = self.render_children(block, context);
        let item = format!(
            "<li>{}{}</li>",
            render_rich_text(&content.rich_text),
            children.content
        );
        BlockRenderResult::list_item(kind, item).with_warnings(children.warnings)
    }

    fn callout(
        &self,
        block: &Block,
        callout: &CalloutBlock,
        context: &FormatContext,
    ) -> BlockRenderResult {
        let icon = match &callout.icon {
            Some(Icon::Emoji { emoji }) => emoji.clone(),
            Some(Icon::External { external }) => format!(
                "<img src=\"{}\" alt=\"icon\" style=\"width:1.2em;height:1.2em;vertical-align:middle;\" />",
                escape_attribute(&external.url)
            ),
            Some(Icon::File { .. }) | None => DEFAULT_CALLOUT_ICON.to_string(),
        };
        let children = self.render_children(block, context);

        let mut html = String::new();
        let _ = writeln!(
            html,
            "<aside class=\"callout callout-{}\">",
            callout.content.color.as_str()
        );
        let _ = writeln!(html, "<span class=\"callout-icon\">{}</span>", icon);
        let _ = writeln!(
            html,
            "<div class=\"callout-content\">\n{}",
            render_rich_text(&callout.content.rich_text)
        );
        html.push_str(&children.content);
        html.push_str("</div>\n</aside>\n");
        BlockRenderResult::fragment(html).with_warnings(children.warnings)
    }

    fn column_list(&self, block: &Block, context: &FormatContext) -> BlockRenderResult {
        let columns = block.children();
        let mut warnings = Vec::new();
        let mut html = format!(
            "<div class=\"columns columns-{}\">\n",
            columns.len().max(1)
        );

        let column_context = context.descend();
        for column in columns {
            let rendered = self.render_children(column, &column_context);
            let _ = write!(html, "<div class=\"column\">\n{}</div>\n", rendered.content);
            warnings.extend(rendered.warnings);
        }

        html.push_str("</div>\n");
        BlockRenderResult::fragment(html).with_warnings(warnings)
    }

    fn synced(
        &self,
        block: &Block,
        synced: &SyncedBlock,
        context: &FormatContext,
    ) -> BlockRenderResult {
        if !block.children().is_empty() {
            let children = self.render_children(block, context);
            return BlockRenderResult::fragment(children.content).with_warnings(children.warnings);
        }

        match &synced.synced_from {
            Some(source) => BlockRenderResult::fragment(format!(
                "<!-- synced block reference: {} -->\n",
                source.block_id
            )),
            None => BlockRenderResult::fragment(String::new()),
        }
    }

    /// Table rows and columns outside their parents, and block types we
    /// do not know: render the children, note the block.
    fn children_only(&self, block: &Block, context: &FormatContext) -> BlockRenderResult {
        let message = match block {
            Block::TableRow(_) | Block::Column(_) => {
                format!("{} rendered outside its parent", block.block_type())
            }
            _ => format!("unhandled block type: {}", block.block_type()),
        };
        log::debug!("{} ({})", message, block.id());

        let children = self.render_children(block, context);
        BlockRenderResult::fragment(children.content)
            .with_warnings(std::iter::once(
                Warning::new(WarningLevel::Info, message).with_context(block.id().to_string()),
            ))
            .with_warnings(children.warnings)
    }
}

// --- Leaf formatters ---

fn caption_html(caption: &[RichTextItem]) -> Option<String> {
    if caption.is_empty() {
        None
    } else {
        Some(render_rich_text(caption))
    }
}

fn code_block(code: &CodeBlock) -> String {
    let language = if code.language.is_empty() {
        "plaintext"
    } else {
        code.language.as_str()
    };
    let mut html = format!(
        "<pre><code class=\"language-{}\">{}</code></pre>\n",
        escape_attribute(language),
        render_rich_text(&code.content.rich_text)
    );
    if let Some(caption) = caption_html(&code.caption) {
        let _ = writeln!(html, "<figcaption class=\"code-caption\">{}</figcaption>", caption);
    }
    html
}

fn image(media: &MediaBlock) -> String {
    let caption = caption_html(&media.caption);
    let alt = caption.as_deref().unwrap_or(DEFAULT_IMAGE_ALT);

    let mut html = String::from("<figure class=\"image-container\">\n");
    let _ = writeln!(
        html,
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" />",
        escape_attribute(media.url()),
        escape_attribute(alt)
    );
    if let Some(caption) = &caption {
        let _ = writeln!(html, "<figcaption>{}</figcaption>", caption);
    }
    html.push_str("</figure>\n");
    html
}

fn video(media: &MediaBlock) -> String {
    let url = media.url();
    let player = if url.contains("youtube.com") || url.contains("youtu.be") {
        match YOUTUBE_VIDEO_ID.captures(url).and_then(|c| c.get(1)) {
            Some(id) => format!(
                "<iframe src=\"https://www.youtube.com/embed/{}\" frameborder=\"0\" allowfullscreen></iframe>",
                escape_attribute(id.as_str())
            ),
            None => {
                log::debug!("YouTube URL without a video id: {}", url);
                return String::new();
            }
        }
    } else {
        format!("<video controls src=\"{}\"></video>", escape_attribute(url))
    };

    let mut html = format!("<figure class=\"video-container\">\n{}\n", player);
    if let Some(caption) = caption_html(&media.caption) {
        let _ = writeln!(html, "<figcaption>{}</figcaption>", caption);
    }
    html.push_str("</figure>\n");
    html
}

fn audio(media: &MediaBlock) -> String {
    let mut html = format!(
        "<figure class=\"audio-container\">\n<audio controls src=\"{}\"></audio>\n",
        escape_attribute(media.url())
    );
    if let Some(caption) = caption_html(&media.caption) {
        let _ = writeln!(html, "<figcaption>{}</figcaption>", caption);
    }
    html.push_str("</figure>\n");
    html
}

/// Display name of an attachment: its own name, else the last URL path
/// segment, else "File".
pub(crate) fn attachment_name(media: &MediaBlock) -> String {
    media
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| media.url().rsplit('/').next().filter(|s| !s.is_empty()))
        .unwrap_or("File")
        .to_string()
}

fn file_attachment(media: &MediaBlock) -> String {
    let mut html = String::from("<div class=\"file-attachment\">\n");
    let _ = writeln!(
        html,
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">📎 {}</a>",
        escape_attribute(media.url()),
        html_escape(&attachment_name(media))
    );
    if let Some(caption) = caption_html(&media.caption) {
        let _ = writeln!(html, "<p class=\"file-caption\">{}</p>", caption);
    }
    html.push_str("</div>\n");
    html
}

fn bookmark(link: &LinkBlock) -> String {
    let label = caption_html(&link.caption).unwrap_or_else(|| html_escape(&link.url));
    format!(
        "<div class=\"embed-container\">\n<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"bookmark\">{}</a>\n</div>\n",
        escape_attribute(&link.url),
        label
    )
}

/// Table markup. With a column header the first row becomes a `<thead>`
/// of `<th>` cells and any remaining rows share one `<tbody>`; without
/// it every row is plain `<td>` cells and no section wrappers appear.
fn table(block: &Block, table: &TableBlock) -> String {
    let rows = block.children();
    let mut html = String::from("<div class=\"table-container\">\n<table>\n");

    for (index, row) in rows.iter().enumerate() {
        let Block::TableRow(row) = row else {
            log::debug!("Skipping non-row child {} of table", row.block_type());
            continue;
        };
        let is_header = table.has_column_header && index == 0;
        let tag = if is_header { "th" } else { "td" };

        if is_header {
            html.push_str("<thead>\n");
        } else if table.has_column_header && index == 1 {
            html.push_str("<tbody>\n");
        }

        html.push_str("<tr>\n");
        for cell in &row.cells {
            let _ = writeln!(html, "<{tag}>{}</{tag}>", render_rich_text(cell));
        }
        html.push_str("</tr>\n");

        if is_header {
            html.push_str("</thead>\n");
        }
    }

    if table.has_column_header && rows.len() > 1 {
        html.push_str("</tbody>\n");
    }
    html.push_str("</table>\n</div>\n");
    html
}

fn child_page(child: &ChildBlock) -> String {
    let title = if child.title.is_empty() {
        UNTITLED_PAGE
    } else {
        child.title.as_str()
    };
    format!(
        "<div class=\"child-page\"><a href=\"#\">📄 {}</a></div>\n",
        html_escape(title)
    )
}

fn child_database(child: &ChildBlock) -> String {
    let title = if child.title.is_empty() {
        "Database"
    } else {
        child.title.as_str()
    };
    format!(
        "<div class=\"child-database\"><span>📊 {}</span></div>\n",
        html_escape(title)
    )
}
