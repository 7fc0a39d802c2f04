use super::Block;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Fields every block carries regardless of its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub children: Vec<Block>,
    /// What the API declared. `children` may still be empty when nothing
    /// could be fetched.
    pub has_children: bool,
    pub archived: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            children: Vec::new(),
            has_children: false,
            archived: false,
        }
    }
}

/// A fresh random id, for synthetic blocks.
impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::from(&crate::types::NotionId::new_v4()))
    }
}
