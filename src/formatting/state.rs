// src/formatting/state.rs
//! Immutable render-time state.
//!
//! Notion has no list container block: a list is just a run of sibling
//! list items. Renderers fold a [`ListContext`] through each sibling
//! sequence, collecting rendered items until the run ends, and then emit
//! the enclosing list markup for the completed [`ListRun`].

use crate::constants::BLOCK_MAX_RENDER_DEPTH;
use crate::model::Block;
use im_rc::Vector;

// --- Core Types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    /// The list kind a block contributes to, if it is a list item.
    pub fn of(block: &Block) -> Option<Self> {
        match block {
            Block::BulletedListItem(_) => Some(ListKind::Bulleted),
            Block::NumberedListItem(_) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    pub fn html_tag(&self) -> &'static str {
        match self {
            ListKind::Bulleted => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

/// A maximal run of same-kind list items, already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRun {
    pub kind: ListKind,
    pub items: Vector<String>,
}

/// The list run in progress while folding over a sibling sequence.
///
/// Every transition returns a new context; a run that ends is handed
/// back to the caller for emission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContext {
    run: Option<ListRun>,
}

impl ListContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.run.is_none()
    }

    pub fn current_kind(&self) -> Option<ListKind> {
        self.run.as_ref().map(|run| run.kind)
    }

    /// Appends an item. When `kind` differs from the active run, that run
    /// is completed and returned alongside the new context.
    pub fn push(&self, kind: ListKind, item: String) -> (Self, Option<ListRun>) {
        match &self.run {
            Some(run) if run.kind == kind => {
                let mut items = run.items.clone();
                items.push_back(item);
                (
                    Self {
                        run: Some(ListRun { kind, items }),
                    },
                    None,
                )
            }
            previous => (
                Self {
                    run: Some(ListRun {
                        kind,
                        items: Vector::unit(item),
                    }),
                },
                previous.clone(),
            ),
        }
    }

    /// Ends the active run, if any.
    pub fn flush(&self) -> (Self, Option<ListRun>) {
        (Self::new(), self.run.clone())
    }
}

/// Immutable formatting context threaded down the block tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatContext {
    depth: usize,
}

impl FormatContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for the children of the current block.
    pub fn descend(&self) -> Self {
        Self {
            depth: self.depth + 1,
        }
    }

    /// Checks if the recursion depth limit has been reached.
    pub fn depth_limit_reached(&self) -> bool {
        self.depth >= BLOCK_MAX_RENDER_DEPTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_kind_items_accumulate() {
        let context = ListContext::new();
        let (context, done) = context.push(ListKind::Bulleted, "a".to_string());
        assert!(done.is_none());
        let (context, done) = context.push(ListKind::Bulleted, "b".to_string());
        assert!(done.is_none());

        let (context, run) = context.flush();
        assert!(context.is_empty());
        let run = run.expect("run should be flushed");
        assert_eq!(run.kind, ListKind::Bulleted);
        assert_eq!(run.items.len(), 2);
    }

    #[test]
    fn test_kind_change_completes_previous_run() {
        let (context, _) = ListContext::new().push(ListKind::Bulleted, "a".to_string());
        let (context, done) = context.push(ListKind::Numbered, "1".to_string());

        let done = done.expect("bulleted run should end");
        assert_eq!(done.kind, ListKind::Bulleted);
        assert_eq!(done.items, Vector::unit("a".to_string()));
        assert_eq!(context.current_kind(), Some(ListKind::Numbered));
    }

    #[test]
    fn test_transitions_leave_original_untouched() {
        let (original, _) = ListContext::new().push(ListKind::Numbered, "1".to_string());
        let _ = original.push(ListKind::Numbered, "2".to_string());
        let _ = original.flush();

        let (_, run) = original.flush();
        assert_eq!(run.map(|r| r.items.len()), Some(1));
    }

    #[test]
    fn test_flush_on_empty_context() {
        let (context, run) = ListContext::new().flush();
        assert!(context.is_empty());
        assert!(run.is_none());
    }

    #[test]
    fn test_depth_limit() {
        let mut context = FormatContext::new();
        for _ in 0..BLOCK_MAX_RENDER_DEPTH {
            assert!(!context.depth_limit_reached());
            context = context.descend();
        }
        assert!(context.depth_limit_reached());
    }
}
