use crate::error::Result;
use crate::scene::{SceneGraph, SolutionId, SolutionNode, SolutionType};

use super::AbsoluteCoordinate;

/// Computes the volume of a primitive solution from its dimensions.
///
/// Box, sphere and cylinder use closed-form formulas; every other kind has
/// zero volume. With [`Volume::scaled`] the result is multiplied by the
/// product of the solution's absolute orientation factors.
pub struct Volume {
    solution: SolutionId,
    scaled: bool,
}

impl Volume {
    /// Creates a new `Volume` query on the unscaled dimensions.
    #[must_use]
    pub fn new(solution: SolutionId) -> Self {
        Self {
            solution,
            scaled: false,
        }
    }

    /// Applies the absolute per-axis scale of the solution.
    #[must_use]
    pub fn scaled(mut self) -> Self {
        self.scaled = true;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution is not in the scene.
    pub fn execute(&self, scene: &SceneGraph) -> Result<f64> {
        let volume = primitive_volume(scene.node(self.solution)?);
        if !self.scaled {
            return Ok(volume);
        }
        let orientation = AbsoluteCoordinate::new(self.solution)
            .execute(scene)?
            .orientation();
        Ok(volume * orientation.product().abs())
    }
}

/// Sums the unscaled volume of a solution and all of its descendants.
pub struct TotalVolume {
    solution: SolutionId,
}

impl TotalVolume {
    /// Creates a new `TotalVolume` query.
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
        let mut total = primitive_volume(scene.node(self.solution)?);
        for id in scene.descendants(self.solution)? {
            total += primitive_volume(scene.node(id)?);
        }
        Ok(total)
    }
}

pub(crate) fn primitive_volume(node: &SolutionNode) -> f64 {
    match node.kind {
        SolutionType::Box => node.dimensions.box_volume(),
        SolutionType::Sphere => node.dimensions.sphere_volume(),
        SolutionType::Cylinder => node.dimensions.cylinder_volume(),
        _ => 0.0,
    }
}
