//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// Expected structural misses (unknown id, boundary reached) are not
/// errors; the engine returns no-op values for those. What remains is
/// the catalog error class, raised before any tree mutation.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("block type already registered: {0}")]
    DuplicateBlockType(String),
}
