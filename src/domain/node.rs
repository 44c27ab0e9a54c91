//! Domain entities: the block node and document tree

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property map of a block, replaced as a whole unit on update.
pub type Props = Map<String, Value>;

/// A document is an ordered sequence of root-level blocks.
/// Order is display order and is preserved by every operation
/// except explicit reordering.
pub type Tree = Vec<BlockNode>;

/// A single typed content block.
///
/// `children` is `Some` (possibly empty) only for container-capable
/// types and `None` for leaf types. Field presence is the sole
/// container discriminator; no operation ever adds or removes the
/// field itself, only its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Unique identifier, assigned at creation, immutable
    pub id: String,
    /// Block type name from the catalog
    #[serde(rename = "type")]
    pub block_type: String,
    /// Type-specific properties
    #[serde(default)]
    pub props: Props,
    /// Ordered child blocks; absent entirely for leaf types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BlockNode>>,
}

impl BlockNode {
    /// Whether this block can contain other blocks.
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// Number of direct children (0 for leaves).
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map(Vec::len).unwrap_or(0)
    }
}

impl fmt::Display for BlockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short_id = self.id.get(..8).unwrap_or(&self.id);
        write!(f, "{} ({})", self.block_type, short_id)
    }
}
