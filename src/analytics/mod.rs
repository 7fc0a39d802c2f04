// src/analytics/mod.rs
//! Statistics over fetched block trees, for logging and completion reports.

use crate::model::Block;
use std::collections::BTreeMap;
use std::fmt;

/// Detailed breakdown of a page's block tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeMeasurement {
    pub total_blocks: usize,
    /// 1 for a flat page, 0 for an empty one.
    pub deepest_nesting: usize,
    pub media_blocks: usize,
    pub unsupported_blocks: usize,
    /// Block counts keyed by wire type name.
    pub by_type: BTreeMap<String, usize>,
}

impl TreeMeasurement {
    /// The `n` most frequent block types, most frequent first.
    pub fn top_types(&self, n: usize) -> Vec<(&str, usize)> {
        let mut types: Vec<(&str, usize)> = self
            .by_type
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        types.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        types.truncate(n);
        types
    }
}

impl fmt::Display for TreeMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} blocks, nesting depth {}",
            self.total_blocks, self.deepest_nesting
        )?;
        if self.media_blocks > 0 {
            write!(f, ", {} media", self.media_blocks)?;
        }
        if self.unsupported_blocks > 0 {
            write!(f, ", {} unsupported", self.unsupported_blocks)?;
        }
        Ok(())
    }
}

pub fn measure_tree(blocks: &[Block]) -> TreeMeasurement {
    let mut measurement = TreeMeasurement::default();
    walk_blocks(&mut measurement, blocks, 1);
    measurement
}

fn walk_blocks(measurement: &mut TreeMeasurement, blocks: &[Block], depth: usize) {
    for block in blocks {
        measurement.total_blocks += 1;
        measurement.deepest_nesting = measurement.deepest_nesting.max(depth);
        *measurement
            .by_type
            .entry(block.block_type().to_string())
            .or_default() += 1;

        match block {
            Block::Image(_) | Block::Video(_) | Block::Audio(_) | Block::File(_) | Block::Pdf(_) => {
                measurement.media_blocks += 1
            }
            Block::Unsupported(_) => measurement.unsupported_blocks += 1,
            _ => {}
        }

        walk_blocks(measurement, block.children(), depth + 1);
    }
}

/// Counts blocks recursively.
pub fn count_blocks(blocks: &[Block]) -> usize {
    blocks.len() + blocks.iter().map(|b| count_blocks(b.children())).sum::<usize>()
}

/// Length of the longest parent-to-leaf chain; 0 for no blocks.
pub fn max_depth(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| 1 + max_depth(block.children()))
        .max()
        .unwrap_or(0)
}
