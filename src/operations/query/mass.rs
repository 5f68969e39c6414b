use crate::error::Result;
use crate::scene::{SceneGraph, SolutionId, SolutionNode, DEFAULT_DENSITY};

use super::volume::primitive_volume;

/// Computes the mass of a solution as volume times material density.
///
/// Solutions without a material are treated as steel.
pub struct Mass {
    solution: SolutionId,
}

impl Mass {
    /// Creates a new `Mass` query.
    #[must_use]
    pub fn new(solution: SolutionId) -> Self {
        Self { solution }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution is not in the scene.
    pub fn execute(&self, scene: &SceneGraph) -> Result<f64> {
        Ok(node_mass(scene.node(self.solution)?))
    }
}

/// Sums the mass of a solution and all of its descendants.
pub struct TotalMass {
    solution: SolutionId,
}

impl TotalMass {
    /// Creates a new `TotalMass` query.
    #[must_use]
    pub fn new(solution: SolutionId) -> Self {
        Self { solution }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution is not in the scene.
    pub fn execute(&self, scene: &SceneGraph) -> Result<f64> {
        let mut total = node_mass(scene.node(self.solution)?);
        for id in scene.descendants(self.solution)? {
            total += node_mass(scene.node(id)?);
        }
        Ok(total)
    }
}

fn node_mass(node: &SolutionNode) -> f64 {
    let density = node.material.as_ref().map_or(DEFAULT_DENSITY, |m| m.density);
    primitive_volume(node) * density
}
