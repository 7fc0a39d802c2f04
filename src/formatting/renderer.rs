// src/formatting/renderer.rs
//! The block rendering seam shared by the HTML and Markdown renderers.
//!
//! A renderer only decides what a single block looks like. Walking sibling
//! sequences, grouping list runs and guarding recursion depth live here as
//! default methods so both output formats get identical structure.

use super::state::{FormatContext, ListContext, ListKind, ListRun};
use crate::constants::{BLOCK_MAX_RENDER_DEPTH, CHARS_PER_BLOCK_ESTIMATE};
use crate::model::Block;
use crate::types::{Warning, WarningLevel};

/// What a single block rendered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Markup emitted in place.
    Fragment(String),
    /// One list item, held back until its run is complete.
    ListItem { kind: ListKind, item: String },
}

/// The result of rendering a single block, plus anything worth reporting.
#[derive(Debug, Clone)]
pub struct BlockRenderResult {
    pub rendered: Rendered,
    pub warnings: Vec<Warning>,
}

impl BlockRenderResult {
    pub fn fragment(content: impl Into<String>) -> Self {
        Self {
            rendered: Rendered::Fragment(content.into()),
            warnings: Vec::new(),
        }
    }

    pub fn list_item(kind: ListKind, item: String) -> Self {
        Self {
            rendered: Rendered::ListItem { kind, item },
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = Warning>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

/// Rendered sibling sequence with the diagnostics collected beneath it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedSequence {
    pub content: String,
    pub warnings: Vec<Warning>,
}

impl RenderedSequence {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Trait for rendering blocks into an output format.
pub trait BlockRenderer {
    /// Render one block. Children are reached through [`render_children`].
    ///
    /// [`render_children`]: BlockRenderer::render_children
    fn render_block(&self, block: &Block, context: &FormatContext) -> BlockRenderResult;

    /// Markup enclosing a completed list run.
    fn render_list_run(&self, run: &ListRun) -> String;

    /// Render a sibling sequence, coalescing list runs.
    fn render_sequence(&self, blocks: &[Block], context: &FormatContext) -> RenderedSequence {
        blocks
            .iter()
            .fold(SequenceFold::with_capacity(blocks.len()), |fold, block| {
                fold.step(self, self.render_block(block, context))
            })
            .finish(self)
    }

    /// Render the children of `block` one level deeper.
    fn render_children(&self, block: &Block, context: &FormatContext) -> RenderedSequence {
        let children = block.children();
        if children.is_empty() {
            return RenderedSequence::default();
        }

        if context.depth_limit_reached() {
            log::warn!(
                "Render depth limit ({}) reached at block {}; {} children skipped",
                BLOCK_MAX_RENDER_DEPTH,
                block.id(),
                children.len()
            );
            return RenderedSequence {
                content: String::new(),
                warnings: vec![Warning::new(
                    WarningLevel::Warning,
                    format!("render depth limit reached, {} children skipped", children.len()),
                )
                .with_context(block.id().to_string())],
            };
        }

        self.render_sequence(children, &context.descend())
    }
}

/// Accumulator for [`BlockRenderer::render_sequence`].
struct SequenceFold {
    output: String,
    warnings: Vec<Warning>,
    list: ListContext,
}

impl SequenceFold {
    fn with_capacity(blocks: usize) -> Self {
        Self {
            output: String::with_capacity(blocks * CHARS_PER_BLOCK_ESTIMATE),
            warnings: Vec::new(),
            list: ListContext::new(),
        }
    }

    fn step<R: BlockRenderer + ?Sized>(mut self, renderer: &R, result: BlockRenderResult) -> Self {
        self.warnings.extend(result.warnings);

        let (list, completed) = match result.rendered {
            Rendered::ListItem { kind, item } => self.list.push(kind, item),
            Rendered::Fragment(content) => {
                let (list, completed) = self.list.flush();
                if let Some(run) = completed {
                    self.output.push_str(&renderer.render_list_run(&run));
                }
                self.output.push_str(&content);
                (list, None)
            }
        };

        if let Some(run) = completed {
            self.output.push_str(&renderer.render_list_run(&run));
        }
        self.list = list;
        self
    }

    fn finish<R: BlockRenderer + ?Sized>(mut self, renderer: &R) -> RenderedSequence {
        if let (_, Some(run)) = self.list.flush() {
            self.output.push_str(&renderer.render_list_run(&run));
        }
        RenderedSequence {
            content: self.output,
            warnings: self.warnings,
        }
    }
}
