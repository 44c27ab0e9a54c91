//! I/O boundary traits for testability
//!
//! The persistence gateway loads and saves a whole document tree as an
//! opaque ordered array of block nodes. The serialized form is exactly
//! the shape the engine operates on, so there is no transformation
//! step at the storage boundary.

use std::path::Path;

use crate::domain::node::{BlockNode, Tree};
use crate::infrastructure::error::{InfraError, InfraResult};

/// Document persistence abstraction.
pub trait DocumentStore: Send + Sync {
    /// Load a whole document tree.
    fn load(&self, path: &Path) -> InfraResult<Tree>;

    /// Save a whole document tree.
    fn save(&self, path: &Path, tree: &[BlockNode]) -> InfraResult<()>;

    /// Check whether a document exists.
    fn exists(&self, path: &Path) -> bool;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// JSON file store. Documents are a JSON array of block nodes with
/// `children` recursively of the same shape; leaf nodes omit the
/// `children` key entirely.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    pretty: bool,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl JsonFileStore {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self, path: &Path) -> InfraResult<Tree> {
        let content = std::fs::read_to_string(path).map_err(|e| InfraError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| InfraError::Format {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn save(&self, path: &Path, tree: &[BlockNode]) -> InfraResult<()> {
        let mut content = if self.pretty {
            serde_json::to_string_pretty(tree)
        } else {
            serde_json::to_string(tree)
        }
        .map_err(|e| InfraError::Format {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        content.push('\n');
        std::fs::write(path, content).map_err(|e| InfraError::io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
