use crate::error::Result;
use crate::scene::{SceneGraph, SolutionId, SolutionNode};

/// Deep-copies a solution and its whole subtree.
///
/// Every copied node gets a fresh identifier; names, coordinates, flags,
/// properties, dimensions and materials are preserved, as is child order.
/// The copy is inserted as a detached root.
pub struct CloneSubtree {
    solution: SolutionId,
}

impl CloneSubtree {
    /// Creates a new `CloneSubtree` operation.
    #[must_use]
    pub fn new(solution: SolutionId) -> Self {
        Self { solution }
    }

    /// Clones the subtree into the same scene and returns the new root.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution is not in the scene.
    pub fn execute(&self, scene: &mut SceneGraph) -> Result<SolutionId> {
        let copies = snapshot(scene, self.solution)?;
        materialize(scene, copies)
    }

    /// Clones the subtree from `source` into `target` and returns the new
    /// root in `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution is not in `source`.
    pub fn execute_into(&self, source: &SceneGraph, target: &mut SceneGraph) -> Result<SolutionId> {
        let copies = snapshot(source, self.solution)?;
        materialize(target, copies)
    }
}

/// Pre-order copies paired with the index of their parent copy.
fn snapshot(scene: &SceneGraph, root: SolutionId) -> Result<Vec<(SolutionNode, Option<usize>)>> {
    let mut copies = vec![(scene.node(root)?.duplicate(), None)];
    let mut stack = vec![(root, 0)];
    while let Some((id, index)) = stack.pop() {
        for &child in scene.children(id)?.iter().rev() {
            copies.push((scene.node(child)?.duplicate(), Some(index)));
            stack.push((child, copies.len() - 1));
        }
    }
    Ok(copies)
}

fn materialize(
    scene: &mut SceneGraph,
    copies: Vec<(SolutionNode, Option<usize>)>,
) -> Result<SolutionId> {
    let mut ids: Vec<SolutionId> = Vec::with_capacity(copies.len());
    let mut links = Vec::new();
    for (node, parent) in copies {
        let id = scene.insert(node);
        if let Some(parent) = parent {
            links.push((parent, id));
        }
        ids.push(id);
    }
    // Children were pushed in reverse, so attach in reverse to restore order.
    for &(parent, child) in links.iter().rev() {
        scene.add_child(ids[parent], child)?;
    }
    tracing::debug!(root = ?ids[0], count = ids.len(), "cloned subtree");
    Ok(ids[0])
}
