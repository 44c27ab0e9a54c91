//! Infrastructure layer: I/O implementations
//!
//! This layer implements the persistence gateway for document trees.

pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use traits::{DocumentStore, JsonFileStore};
