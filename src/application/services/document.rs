//! Document editing service
//!
//! Orchestrates catalog, engine, and store for whole user actions.
//! The engine itself fails silently on structural misses; this layer
//! is where container-capability and parent existence are validated
//! up front so callers get loud errors for programmer mistakes.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::node::{BlockNode, Props, Tree};
use crate::domain::ops::{self, Direction};
use crate::domain::BlockCatalog;
use crate::infrastructure::traits::DocumentStore;

/// Typed drag-and-drop message.
///
/// Replaces string-encoded transfer payloads: a drop either creates a
/// fresh block of a type or moves an existing block by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropPayload {
    Create { block_type: String },
    Move { id: String },
}

/// Service for loading, editing, and saving block documents.
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    catalog: BlockCatalog,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: BlockCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// Load a document tree from the store.
    pub fn load(&self, path: &Path) -> ApplicationResult<Tree> {
        debug!("load: path={}", path.display());
        self.store
            .load(path)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("load document {}", path.display()),
                source: Box::new(e),
            })
    }

    /// Save a document tree to the store.
    pub fn save(&self, path: &Path, tree: &[BlockNode]) -> ApplicationResult<()> {
        debug!("save: path={}, roots={}", path.display(), tree.len());
        self.store
            .save(path, tree)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("save document {}", path.display()),
                source: Box::new(e),
            })
    }

    /// Create a new, empty document.
    pub fn create_document(&self, path: &Path, force: bool) -> ApplicationResult<()> {
        debug!("create_document: path={}", path.display());
        if self.store.exists(path) && !force {
            return Err(ApplicationError::OperationFailed {
                context: format!("document already exists: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "refusing to overwrite (use force)",
                )),
            });
        }
        self.save(path, &[])
    }

    /// Instantiate a default block of `block_type` and append it under
    /// `parent_id` (or at root level).
    ///
    /// Returns the new tree and the created block.
    pub fn add_block(
        &self,
        tree: &[BlockNode],
        block_type: &str,
        parent_id: Option<&str>,
    ) -> ApplicationResult<(Tree, BlockNode)> {
        debug!("add_block: type={}, parent={:?}", block_type, parent_id);
        self.validate_parent(tree, parent_id)?;
        let node = self.catalog.create_default(block_type)?;
        let created = node.clone();
        Ok((ops::add_child(tree, parent_id, node), created))
    }

    /// Instantiate a default block and insert it at a position.
    pub fn insert_block(
        &self,
        tree: &[BlockNode],
        block_type: &str,
        parent_id: Option<&str>,
        index: usize,
    ) -> ApplicationResult<(Tree, BlockNode)> {
        debug!(
            "insert_block: type={}, parent={:?}, index={}",
            block_type, parent_id, index
        );
        self.validate_parent(tree, parent_id)?;
        let node = self.catalog.create_default(block_type)?;
        let created = node.clone();
        Ok((ops::insert_into(tree, parent_id, index, node), created))
    }

    /// Replace a block's props as a whole unit (inspector contract:
    /// no partial-field merge).
    pub fn replace_props(&self, tree: &[BlockNode], id: &str, props: Props) -> Tree {
        debug!("replace_props: id={}", id);
        ops::update_node(tree, id, move |mut node| {
            node.props = props;
            node
        })
    }

    /// Remove a block and its subtree.
    pub fn remove_block(&self, tree: &[BlockNode], id: &str) -> Tree {
        debug!("remove_block: id={}", id);
        ops::remove_node(tree, id)
    }

    /// Swap a block with its neighbor in the given direction.
    pub fn move_block(&self, tree: &[BlockNode], id: &str, direction: Direction) -> Tree {
        debug!("move_block: id={}, direction={:?}", id, direction);
        ops::move_node(tree, id, direction)
    }

    /// Move a block to a target parent and index.
    pub fn move_block_to(
        &self,
        tree: &[BlockNode],
        id: &str,
        target_parent_id: Option<&str>,
        target_index: usize,
    ) -> Tree {
        debug!(
            "move_block_to: id={}, parent={:?}, index={}",
            id, target_parent_id, target_index
        );
        ops::move_node_to(tree, id, target_parent_id, target_index)
    }

    /// Apply a drop: create a fresh block or move an existing one to
    /// the target position. An absent payload (cancelled drag) returns
    /// the tree unchanged.
    pub fn handle_drop(
        &self,
        tree: &[BlockNode],
        payload: Option<DropPayload>,
        target_parent_id: Option<&str>,
        target_index: usize,
    ) -> ApplicationResult<Tree> {
        debug!(
            "handle_drop: payload={:?}, parent={:?}, index={}",
            payload, target_parent_id, target_index
        );
        match payload {
            None => Ok(tree.to_vec()),
            Some(DropPayload::Create { block_type }) => {
                let (out, _) =
                    self.insert_block(tree, &block_type, target_parent_id, target_index)?;
                Ok(out)
            }
            Some(DropPayload::Move { id }) => {
                Ok(ops::move_node_to(tree, &id, target_parent_id, target_index))
            }
        }
    }

    /// Check that a named parent exists and can hold children.
    /// `None` (root level) is always valid.
    fn validate_parent(&self, tree: &[BlockNode], parent_id: Option<&str>) -> ApplicationResult<()> {
        let Some(pid) = parent_id else {
            return Ok(());
        };
        let parent = ops::find(tree, pid)
            .ok_or_else(|| ApplicationError::ParentNotFound(pid.to_string()))?;
        if !self.catalog.is_container_type(&parent.block_type) || !parent.is_container() {
            return Err(ApplicationError::NotAContainer {
                id: parent.id.clone(),
                block_type: parent.block_type.clone(),
            });
        }
        Ok(())
    }
}
