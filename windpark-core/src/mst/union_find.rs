//! Union-find (disjoint set union) keyed by node identity.
//!
//! Kruskal's algorithm uses this structure to reject edges that would close a
//! cycle. `find` compresses paths so every visited element ends up pointing
//! straight at its representative; `union` attaches the left representative
//! under the right one.

use std::collections::HashMap;

use crate::error::DisjointSetError;
use crate::graph::NodeId;

/// Disjoint-set forest over [`NodeId`]s.
///
/// # Examples
/// ```
/// use windpark_core::{DisjointSet, NodeId};
///
/// let (a, b, c) = (NodeId::turbine(0), NodeId::turbine(1), NodeId::turbine(2));
/// let mut sets = DisjointSet::new();
/// for node in [a, b, c] {
///     sets.make_set(node)?;
/// }
/// assert!(sets.union(a, b)?);
/// assert!(!sets.union(b, a)?);
/// assert!(sets.same_set(a, b)?);
/// assert!(!sets.same_set(a, c)?);
/// # Ok::<(), windpark_core::DisjointSetError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    parent: HashMap<NodeId, NodeId>,
}

impl DisjointSet {
    /// Creates an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a singleton set for `node`.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::DuplicateElement`] when `node` already
    /// belongs to a set.
    pub fn make_set(&mut self, node: NodeId) -> Result<(), DisjointSetError> {
        if self.parent.contains_key(&node) {
            return Err(DisjointSetError::DuplicateElement { node });
        }
        self.parent.insert(node, node);
        Ok(())
    }

    /// Returns the representative of `node`'s set, compressing the path.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownElement`] when `node` was never
    /// added.
    pub fn find(&mut self, node: NodeId) -> Result<NodeId, DisjointSetError> {
        let mut root = node;
        loop {
            let parent = *self
                .parent
                .get(&root)
                .ok_or(DisjointSetError::UnknownElement { node })?;
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = node;
        while current != root {
            current = self.parent.insert(current, root).unwrap_or(root);
        }

        Ok(root)
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `false` when they were already in the same set.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownElement`] if either element is
    /// unknown.
    pub fn union(&mut self, left: NodeId, right: NodeId) -> Result<bool, DisjointSetError> {
        let left_root = self.find(left)?;
        let right_root = self.find(right)?;
        if left_root == right_root {
            return Ok(false);
        }
        self.parent.insert(left_root, right_root);
        Ok(true)
    }

    /// Returns `true` when both elements share a representative.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownElement`] if either element is
    /// unknown.
    pub fn same_set(&mut self, left: NodeId, right: NodeId) -> Result<bool, DisjointSetError> {
        Ok(self.find(left)? == self.find(right)?)
    }

    /// Returns `true` when `node` has been added.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.parent.contains_key(&node)
    }

    /// Number of elements tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when no element has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct sets.
    pub fn set_count(&mut self) -> usize {
        let nodes: Vec<NodeId> = self.parent.keys().copied().collect();
        nodes
            .into_iter()
            .filter(|&node| self.find(node).is_ok_and(|root| root == node))
            .count()
    }

    #[cfg(test)]
    pub(super) fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(&node).copied()
    }
}
