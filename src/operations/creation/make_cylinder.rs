use crate::error::{OperationError, Result};
use crate::geometry::{Dimensions, SolutionCoordinate};
use crate::scene::{Material, SceneGraph, SolutionId, SolutionNode, SolutionType};

/// Creates a cylinder solution standing on the coordinate's position.
pub struct MakeCylinder {
    coordinate: SolutionCoordinate,
    radius: f64,
    height: f64,
    name: String,
    material: Option<Material>,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    #[must_use]
    pub fn new(coordinate: SolutionCoordinate, radius: f64, height: f64) -> Self {
        Self {
            coordinate,
            radius,
            height,
            name: "Cylinder".into(),
            material: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Executes the operation, inserting the cylinder as a detached root.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or height is not strictly positive.
    pub fn execute(&self, scene: &mut SceneGraph) -> Result<SolutionId> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(
                OperationError::InvalidInput("cylinder radius must be positive".into()).into(),
            );
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(
                OperationError::InvalidInput("cylinder height must be positive".into()).into(),
            );
        }

        let mut node = SolutionNode::new(self.name.clone(), self.coordinate)
            .with_kind(SolutionType::Cylinder)
            .with_dimensions(Dimensions::cylinder(self.radius, self.height));
        node.material.clone_from(&self.material);
        Ok(scene.insert(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_fails() {
        let mut scene = SceneGraph::new();
        let result = MakeCylinder::new(SolutionCoordinate::default(), 0.0, 5.0).execute(&mut scene);
        assert!(result.is_err());
    }

    #[test]
    fn zero_height_fails() {
        let mut scene = SceneGraph::new();
        let result = MakeCylinder::new(SolutionCoordinate::default(), 3.0, 0.0).execute(&mut scene);
        assert!(result.is_err());
    }
}
