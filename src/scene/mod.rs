pub mod kind;
pub mod material;
pub mod node;
pub mod property;

pub use kind::SolutionType;
pub use material::{Material, DEFAULT_DENSITY};
pub use node::{SolutionId, SolutionNode};
pub use property::PropertyValue;

use crate::error::HierarchyError;
use slotmap::SlotMap;
use uuid::Uuid;

/// Central arena that owns every solution of a scene.
///
/// Nodes reference their parent and children by [`SolutionId`]. All link
/// changes go through [`SceneGraph::add_child`] and
/// [`SceneGraph::remove_child`], which maintain two invariants:
///
/// - a node is listed in at most one parent's children, and that parent is
///   the one recorded in the node;
/// - no node is its own ancestor.
#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<SolutionId, SolutionNode>,
}

impl SceneGraph {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node as a detached root and returns its ID.
    pub fn insert(&mut self, mut node: SolutionNode) -> SolutionId {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    /// Returns a reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the scene.
    pub fn node(&self, id: SolutionId) -> Result<&SolutionNode, HierarchyError> {
        self.nodes.get(id).ok_or_else(|| not_found(id))
    }

    /// Returns a mutable reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the scene.
    pub fn node_mut(&mut self, id: SolutionId) -> Result<&mut SolutionNode, HierarchyError> {
        self.nodes.get_mut(id).ok_or_else(|| not_found(id))
    }

    #[must_use]
    pub fn contains(&self, id: SolutionId) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SolutionId, &SolutionNode)> {
        self.nodes.iter()
    }

    /// Returns every node without a parent.
    #[must_use]
    pub fn roots(&self) -> Vec<SolutionId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    #[must_use]
    pub fn find_by_uid(&self, uid: Uuid) -> Option<SolutionId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.uid() == uid)
            .map(|(id, _)| id)
    }

    /// Returns the first node with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<SolutionId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    // --- Hierarchy ---

    /// Attaches `child` as the last child of `parent`.
    ///
    /// Does nothing if `child` is already a direct child of `parent`.
    /// Otherwise `child` is first detached from its current parent.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is missing, or if `child` is `parent`
    /// itself or one of its ancestors. The scene is unchanged on error.
    pub fn add_child(
        &mut self,
        parent: SolutionId,
        child: SolutionId,
    ) -> Result<(), HierarchyError> {
        let previous = self.node(child)?.parent;
        self.node(parent)?;

        if previous == Some(parent) {
            return Ok(());
        }
        if child == parent || self.is_ancestor(child, parent)? {
            tracing::warn!(?parent, ?child, "rejected attachment that would create a cycle");
            return Err(HierarchyError::Cycle {
                parent: format!("{parent:?}"),
                child: format!("{child:?}"),
            });
        }

        if let Some(old_parent) = previous {
            tracing::debug!(?child, from = ?old_parent, to = ?parent, "re-parenting solution");
            self.node_mut(old_parent)?.children.retain(|&id| id != child);
        }
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detaches `child` from `parent`, returning whether it was a child.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is missing.
    pub fn remove_child(
        &mut self,
        parent: SolutionId,
        child: SolutionId,
    ) -> Result<bool, HierarchyError> {
        self.node(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        let Some(index) = siblings.iter().position(|&id| id == child) else {
            return Ok(false);
        };
        siblings.remove(index);
        self.node_mut(child)?.parent = None;
        Ok(true)
    }

    /// Returns the parent of a node, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing.
    pub fn parent(&self, id: SolutionId) -> Result<Option<SolutionId>, HierarchyError> {
        Ok(self.node(id)?.parent)
    }

    /// Returns the ordered children of a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing.
    pub fn children(&self, id: SolutionId) -> Result<&[SolutionId], HierarchyError> {
        Ok(self.node(id)?.children())
    }

    /// Walks up to the ancestor without a parent. A detached node is its own
    /// root.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing.
    pub fn root(&self, id: SolutionId) -> Result<SolutionId, HierarchyError> {
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// Returns the ancestors of a node, nearest first. The node itself is
    /// not included.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing.
    pub fn ancestors(&self, id: SolutionId) -> Result<Vec<SolutionId>, HierarchyError> {
        let mut ancestors = Vec::new();
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.node(parent)?.parent;
        }
        Ok(ancestors)
    }

    /// Returns the whole subtree below a node in pre-order (each child is
    /// followed by its own descendants). The node itself is not included.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing.
    pub fn descendants(&self, id: SolutionId) -> Result<Vec<SolutionId>, HierarchyError> {
        let mut descendants = Vec::new();
        let mut stack: Vec<SolutionId> = self.node(id)?.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            descendants.push(current);
            stack.extend(self.node(current)?.children.iter().rev());
        }
        Ok(descendants)
    }

    /// Returns whether `candidate` is a strict ancestor of `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is missing.
    pub fn is_ancestor(
        &self,
        candidate: SolutionId,
        id: SolutionId,
    ) -> Result<bool, HierarchyError> {
        self.node(candidate)?;
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            if parent == candidate {
                return Ok(true);
            }
            current = self.node(parent)?.parent;
        }
        Ok(false)
    }

    /// Removes a node together with its subtree, detaching it from its
    /// parent. Returns the number of nodes removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing.
    pub fn remove(&mut self, id: SolutionId) -> Result<usize, HierarchyError> {
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }
        let mut doomed = self.descendants(id)?;
        doomed.push(id);
        for &gone in &doomed {
            self.nodes.remove(gone);
        }
        tracing::debug!(?id, removed = doomed.len(), "removed subtree");
        Ok(doomed.len())
    }
}

fn not_found(id: SolutionId) -> HierarchyError {
    HierarchyError::NotFound(format!("{id:?}"))
}
