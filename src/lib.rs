//! blocktree — block-tree editing engine for page-builder documents.
//!
//! The core is the pure engine in [`domain`]: a nested, ordered, typed
//! content tree and the operations that find, insert, move, update,
//! and remove blocks while preserving structural invariants (unique
//! ids, acyclicity, valid containment, display order). Everything
//! around it is plumbing: [`application`] orchestrates whole user
//! actions, [`infrastructure`] persists documents as JSON, [`cli`]
//! exposes the operations as subcommands.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use config::Settings;
pub use domain::{BlockCatalog, BlockNode, BlockTypeSpec, Direction, Props, Tree};
