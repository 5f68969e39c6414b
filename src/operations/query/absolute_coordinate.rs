use crate::error::Result;
use crate::geometry::SolutionCoordinate;
use crate::scene::{SceneGraph, SolutionId};

/// Computes the coordinate of a solution in scene space.
///
/// The local coordinate is composed with every ancestor's: positions are
/// summed and orientation factors multiplied. Nothing is cached, so each
/// call walks the full ancestor chain.
pub struct AbsoluteCoordinate {
    solution: SolutionId,
}

impl AbsoluteCoordinate {
    /// Creates a new `AbsoluteCoordinate` query.
    #[must_use]
    pub fn new(solution: SolutionId) -> Self {
        Self { solution }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution or one of its ancestors is missing.
    pub fn execute(&self, scene: &SceneGraph) -> Result<SolutionCoordinate> {
        let local = scene.node(self.solution)?.coordinate;
        let ancestors = scene.ancestors(self.solution)?;

        // Compose from the root downwards.
        let mut absolute = SolutionCoordinate::default();
        for id in ancestors.into_iter().rev() {
            absolute = absolute + scene.node(id)?.coordinate;
        }
        Ok(absolute + local)
    }
}
