use crate::error::Result;
use crate::scene::{SceneGraph, SolutionId, SolutionType};

/// Computes the surface area of a primitive solution from its dimensions.
///
/// Non-primitive kinds report zero.
pub struct SurfaceArea {
    solution: SolutionId,
}

impl SurfaceArea {
    /// Creates a new `SurfaceArea` query.
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
        let node = scene.node(self.solution)?;
        Ok(match node.kind {
            SolutionType::Box => node.dimensions.box_area(),
            SolutionType::Sphere => node.dimensions.sphere_area(),
            SolutionType::Cylinder => node.dimensions.cylinder_area(),
            _ => 0.0,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::SolutionCoordinate;
    use crate::operations::creation::{MakeBox, MakeCylinder};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn box_area() {
        let mut scene = SceneGraph::new();
        let id = MakeBox::new(SolutionCoordinate::default(), 1.0, 1.0, 1.0)
            .execute(&mut scene)
            .unwrap();
        assert_relative_eq!(SurfaceArea::new(id).execute(&scene).unwrap(), 6.0);
    }

    #[test]
    fn cylinder_area_includes_caps() {
        let mut scene = SceneGraph::new();
        let id = MakeCylinder::new(SolutionCoordinate::default(), 1.0, 1.0)
            .execute(&mut scene)
            .unwrap();
        assert_relative_eq!(SurfaceArea::new(id).execute(&scene).unwrap(), 4.0 * PI);
    }
}
