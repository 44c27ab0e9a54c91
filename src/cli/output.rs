//! Terminal output formatting with colors and tree rendering
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::node::BlockNode;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Render a whole document as a display tree rooted at the file name.
pub fn document_tree(root_label: &str, tree: &[BlockNode]) -> Tree<String> {
    Tree::new(root_label.to_string()).with_leaves(tree.iter().map(block_tree))
}

fn block_tree(node: &BlockNode) -> Tree<String> {
    let leaves: Vec<_> = node
        .children
        .iter()
        .flatten()
        .map(block_tree)
        .collect();
    Tree::new(node.to_string()).with_leaves(leaves)
}
