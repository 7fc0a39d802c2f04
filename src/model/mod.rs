mod block;
pub mod blocks;
pub mod common;
mod page;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use page::{Page, Parent, PropertyValue};
