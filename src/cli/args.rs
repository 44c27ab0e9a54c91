//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Direction;

/// Block-tree editor for page-builder documents
#[derive(Parser, Debug)]
#[command(name = "blocktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase debug output (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory for local configuration (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty document
    New {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Overwrite if the document exists
        #[arg(short, long)]
        force: bool,
    },

    /// List block types in the palette
    Types,

    /// Append a default block at root level or under a parent
    Add {
        /// Document file
        file: PathBuf,
        /// Block type name
        block_type: String,
        /// Parent block id (root level if omitted)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Insert a default block at a position
    Insert {
        /// Document file
        file: PathBuf,
        /// Block type name
        block_type: String,
        /// Parent block id (root level if omitted)
        #[arg(short, long)]
        parent: Option<String>,
        /// Insertion index (clamped to the valid range)
        #[arg(long, default_value_t = 0)]
        at: usize,
    },

    /// Replace a block's props with a JSON object
    Set {
        /// Document file
        file: PathBuf,
        /// Block id
        id: String,
        /// New props as a JSON object
        props: String,
    },

    /// Remove a block and its entire subtree
    Remove {
        /// Document file
        file: PathBuf,
        /// Block id
        id: String,
    },

    /// Swap a block with its neighbor
    Move {
        /// Document file
        file: PathBuf,
        /// Block id
        id: String,
        /// Swap direction
        #[arg(value_enum)]
        direction: MoveDirection,
    },

    /// Move a block to a target parent and index
    MoveTo {
        /// Document file
        file: PathBuf,
        /// Block id
        id: String,
        /// Target parent block id (root level if omitted)
        #[arg(short, long)]
        parent: Option<String>,
        /// Target index (clamped to the valid range)
        #[arg(long, default_value_t = 0)]
        at: usize,
    },

    /// Apply a drag-and-drop payload (JSON)
    Drop {
        /// Document file
        file: PathBuf,
        /// Payload, e.g. '{"kind":"create","block_type":"text"}' or
        /// '{"kind":"move","id":"..."}'; omitted = cancelled drag
        payload: Option<String>,
        /// Target parent block id (root level if omitted)
        #[arg(short, long)]
        parent: Option<String>,
        /// Target index (clamped to the valid range)
        #[arg(long, default_value_t = 0)]
        at: usize,
    },

    /// Print the document structure as a tree
    Show {
        /// Document file
        file: PathBuf,
    },

    /// Print a block (and its subtree) as JSON
    Find {
        /// Document file
        file: PathBuf,
        /// Block id
        id: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

/// Direction argument for `move`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}
