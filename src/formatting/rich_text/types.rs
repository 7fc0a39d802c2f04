// src/formatting/rich_text/types.rs
//! Structured form of rich text, independent of the output format.

use crate::types::Color;

/// An ordered run of styled segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedText {
    pub segments: Vec<TextSegment>,
}

impl FormattedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segment(mut self, segment: TextSegment) -> Self {
        self.segments.push(segment);
        self
    }
}

/// A single segment of text with consistent formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    pub content: TextContent,
    pub style: TextStyle,
}

impl TextSegment {
    pub fn is_empty(&self) -> bool {
        match &self.content {
            TextContent::Plain(s) => s.is_empty(),
            TextContent::Equation(expression) => expression.is_empty(),
        }
    }
}

/// What the segment shows. Mentions arrive already resolved to their
/// display text, so they are plain here.
#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    Plain(String),
    Equation(String),
}

/// Formatting applied to a segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
    pub link: Option<String>,
}
