//! Domain layer: the block tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! config loading). It holds the data model, the block catalog, and
//! the pure tree operations.

pub mod catalog;
pub mod error;
pub mod node;
pub mod ops;

pub use catalog::{BlockCatalog, BlockTypeSpec};
pub use error::DomainError;
pub use node::{BlockNode, Props, Tree};
pub use ops::{Direction, ParentInfo};
