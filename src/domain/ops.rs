//! Pure tree operations: find, insert, update, remove, move.
//!
//! Every function here is a synchronous, deterministic mapping from
//! `(tree, parameters)` to a new tree (or a borrowed find result).
//! Inputs are never mutated; callers holding an older snapshot keep it
//! intact. Expected structural misses (unknown id, boundary reached,
//! degenerate move target) return the tree unchanged rather than an
//! error, so callers can always re-render the result directly.

use tracing::instrument;

use crate::domain::node::{BlockNode, Tree};

/// Direction for a sibling swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Location of a node within its sibling sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentInfo {
    /// Id of the parent node, `None` for root-level nodes
    pub parent_id: Option<String>,
    /// Index within the sibling sequence
    pub index: usize,
}

/// Depth-first pre-order traversal primitive.
///
/// Invokes `visit` for every node with the node itself, its parent
/// (`None` for roots), its sibling index, and the index path leading
/// to its parent. Traversal order matches display order, so "first
/// match wins" is well-defined for everything built on top.
pub fn walk<F>(nodes: &[BlockNode], visit: &mut F)
where
    F: FnMut(&BlockNode, Option<&BlockNode>, usize, &[usize]),
{
    let mut path = Vec::new();
    walk_inner(nodes, None, &mut path, visit);
}

fn walk_inner<F>(
    nodes: &[BlockNode],
    parent: Option<&BlockNode>,
    path: &mut Vec<usize>,
    visit: &mut F,
) where
    F: FnMut(&BlockNode, Option<&BlockNode>, usize, &[usize]),
{
    for (i, node) in nodes.iter().enumerate() {
        visit(node, parent, i, path);
        if let Some(children) = &node.children {
            path.push(i);
            walk_inner(children, Some(node), path, visit);
            path.pop();
        }
    }
}

/// Find a node by id anywhere in the tree.
///
/// Pre-order depth-first search; since ids are unique the first match
/// is the only match. Returns `None` when absent, never errors.
pub fn find<'a>(nodes: &'a [BlockNode], id: &str) -> Option<&'a BlockNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = &node.children {
            if let Some(found) = find(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Replace a node by id, applying `updater` to an independent copy.
///
/// The updater receives a deep clone of the matched node and may mutate
/// it freely; the result is substituted in place, keeping sibling
/// position. Nodes off the path to the target are passed through
/// unchanged. An unknown id returns the tree unchanged; callers that
/// need confirmation should check with [`find`] first.
pub fn update_node<F>(nodes: &[BlockNode], id: &str, updater: F) -> Tree
where
    F: FnOnce(BlockNode) -> BlockNode,
{
    let mut updater = Some(updater);
    update_inner(nodes, id, &mut updater)
}

fn update_inner<F>(nodes: &[BlockNode], id: &str, updater: &mut Option<F>) -> Tree
where
    F: FnOnce(BlockNode) -> BlockNode,
{
    nodes
        .iter()
        .map(|node| {
            if node.id == id {
                if let Some(apply) = updater.take() {
                    return apply(node.clone());
                }
            }
            match &node.children {
                Some(children) => {
                    let mut copy = node.clone();
                    copy.children = Some(update_inner(children, id, updater));
                    copy
                }
                None => node.clone(),
            }
        })
        .collect()
}

/// Append a node under a parent, or to the root sequence when no
/// parent is given.
///
/// Silent no-op when the parent id does not resolve or names a leaf
/// node. Callers are responsible for validating container-capability
/// up front; the engine only honors the presence of `children`.
pub fn add_child(nodes: &[BlockNode], parent_id: Option<&str>, node: BlockNode) -> Tree {
    match parent_id {
        None => {
            let mut out = nodes.to_vec();
            out.push(node);
            out
        }
        Some(pid) => update_node(nodes, pid, move |mut parent| {
            if let Some(children) = parent.children.as_mut() {
                children.push(node);
            }
            parent
        }),
    }
}

/// Insert a node at a position within a parent's children (or the
/// root sequence when no parent is given).
///
/// The index is clamped into `[0, len]`, so an out-of-range request
/// degrades to "insert at the nearest valid boundary". Drop indices
/// computed optimistically by a UI are never rejected for an
/// off-by-one.
pub fn insert_into(
    nodes: &[BlockNode],
    parent_id: Option<&str>,
    index: usize,
    node: BlockNode,
) -> Tree {
    match parent_id {
        None => {
            let mut out = nodes.to_vec();
            let i = index.min(out.len());
            out.insert(i, node);
            out
        }
        Some(pid) => update_node(nodes, pid, move |mut parent| {
            if let Some(children) = parent.children.as_mut() {
                let i = index.min(children.len());
                children.insert(i, node);
            }
            parent
        }),
    }
}

/// Remove a node and its entire subtree.
///
/// Sibling order of the remaining nodes is preserved. An unknown id
/// returns the tree unchanged.
pub fn remove_node(nodes: &[BlockNode], id: &str) -> Tree {
    remove_node_with_return(nodes, id).0
}

/// Remove a node and also yield the detached node.
///
/// Move semantics relocate the exact removed node rather than
/// reconstructing it, which is why this variant exists.
pub fn remove_node_with_return(nodes: &[BlockNode], id: &str) -> (Tree, Option<BlockNode>) {
    let mut removed = None;
    let tree = remove_inner(nodes, id, &mut removed);
    (tree, removed)
}

fn remove_inner(nodes: &[BlockNode], id: &str, removed: &mut Option<BlockNode>) -> Tree {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if removed.is_none() && node.id == id {
            *removed = Some(node.clone());
            continue;
        }
        match &node.children {
            Some(children) => {
                let mut copy = node.clone();
                copy.children = Some(remove_inner(children, id, removed));
                out.push(copy);
            }
            None => out.push(node.clone()),
        }
    }
    out
}

/// Swap a node with its immediate neighbor in the given direction.
///
/// Works at any depth; never changes parentage. Reaching the start or
/// end of the sibling sequence is a boundary no-op, not an error.
#[instrument(level = "trace", skip(nodes))]
pub fn move_node(nodes: &[BlockNode], id: &str, direction: Direction) -> Tree {
    if let Some(idx) = nodes.iter().position(|n| n.id == id) {
        let target = match direction {
            Direction::Up => idx.checked_sub(1),
            Direction::Down => (idx + 1 < nodes.len()).then_some(idx + 1),
        };
        let mut out = nodes.to_vec();
        if let Some(t) = target {
            out.swap(idx, t);
        }
        return out;
    }
    nodes
        .iter()
        .map(|node| match &node.children {
            Some(children) => {
                let mut copy = node.clone();
                copy.children = Some(move_node(children, id, direction));
                copy
            }
            None => node.clone(),
        })
        .collect()
}

/// Locate the parent id and sibling index of a node.
pub fn find_parent_info(nodes: &[BlockNode], id: &str) -> Option<ParentInfo> {
    find_parent_inner(nodes, id, None)
}

fn find_parent_inner(
    nodes: &[BlockNode],
    id: &str,
    parent_id: Option<&str>,
) -> Option<ParentInfo> {
    for (i, node) in nodes.iter().enumerate() {
        if node.id == id {
            return Some(ParentInfo {
                parent_id: parent_id.map(str::to_string),
                index: i,
            });
        }
        if let Some(children) = &node.children {
            if let Some(info) = find_parent_inner(children, id, Some(&node.id)) {
                return Some(info);
            }
        }
    }
    None
}

/// Whether `test_id` lies in the subtree rooted at `ancestor_id`
/// (including the root of that subtree itself).
pub fn is_descendant(nodes: &[BlockNode], ancestor_id: &str, test_id: &str) -> bool {
    let Some(ancestor) = find(nodes, ancestor_id) else {
        return false;
    };
    let mut found = false;
    walk(std::slice::from_ref(ancestor), &mut |node, _, _, _| {
        if node.id == test_id {
            found = true;
        }
    });
    found
}

/// Move a node to a target parent and index (drag-and-drop semantics).
///
/// Degenerate targets are rejected as no-ops: the node itself, a node
/// inside its own subtree (cycle guard), a missing target parent, or a
/// leaf target parent. When source and destination are the same
/// sibling sequence and the source index was below the target, the
/// target index is decremented by one: removal shifts later siblings
/// left, and the caller computed the index against the pre-removal
/// sequence. Exactly one remove and one insert occur; a node is never
/// duplicated or lost.
#[instrument(level = "trace", skip(nodes))]
pub fn move_node_to(
    nodes: &[BlockNode],
    id: &str,
    target_parent_id: Option<&str>,
    target_index: usize,
) -> Tree {
    if let Some(pid) = target_parent_id {
        if pid == id {
            return nodes.to_vec();
        }
        if is_descendant(nodes, id, pid) {
            return nodes.to_vec();
        }
        // The destination must be able to receive the node before it
        // is detached, otherwise the remove step would lose it.
        match find(nodes, pid) {
            Some(parent) if parent.is_container() => {}
            _ => return nodes.to_vec(),
        }
    }

    let Some(source) = find_parent_info(nodes, id) else {
        return nodes.to_vec();
    };

    let (tree, removed) = remove_node_with_return(nodes, id);
    let Some(detached) = removed else {
        return nodes.to_vec();
    };

    let same_sequence = source.parent_id.as_deref() == target_parent_id;
    let mut adjusted = target_index;
    if same_sequence && source.index < target_index {
        // Removal shifted subsequent indices down by one.
        adjusted = target_index - 1;
    }

    insert_into(&tree, target_parent_id, adjusted, detached)
}
