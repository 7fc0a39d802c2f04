// src/formatting/mod.rs
//! Renders Notion block trees into HTML and Markdown and assembles the
//! exported page.

// Sub-modules
pub mod document;
pub mod html;
pub mod markdown;
mod renderer;
pub mod rich_text;
mod slug;
mod state;
mod styles;

pub use self::document::{compose_markdown, compose_page_html, render_html_document, Frontmatter};
pub use self::html::{render_blocks, render_blocks_with_diagnostics, HtmlBlockRenderer, RenderOutcome};
pub use self::markdown::{
    render_markdown, render_markdown_with_diagnostics, MarkdownBlockRenderer,
};
pub use self::renderer::{BlockRenderResult, BlockRenderer, Rendered, RenderedSequence};
pub use self::rich_text::{plain_text, render_rich_text, rich_text_to_markdown};
pub use self::slug::slugify;
pub use self::state::{FormatContext, ListContext, ListKind, ListRun};
pub use self::styles::page_stylesheet;
