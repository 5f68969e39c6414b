use crate::error::{OperationError, Result};
use crate::geometry::{Dimensions, SolutionCoordinate};
use crate::scene::{Material, SceneGraph, SolutionId, SolutionNode, SolutionType};

/// Creates a sphere solution centered at the coordinate's position.
pub struct MakeSphere {
    coordinate: SolutionCoordinate,
    radius: f64,
    name: String,
    material: Option<Material>,
}

impl MakeSphere {
    /// Creates a new `MakeSphere` operation.
    #[must_use]
    pub fn new(coordinate: SolutionCoordinate, radius: f64) -> Self {
        Self {
            coordinate,
            radius,
            name: "Sphere".into(),
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

    /// Executes the operation, inserting the sphere as a detached root.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive.
    pub fn execute(&self, scene: &mut SceneGraph) -> Result<SolutionId> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(
                OperationError::InvalidInput("sphere radius must be positive".into()).into(),
            );
        }

        let mut node = SolutionNode::new(self.name.clone(), self.coordinate)
            .with_kind(SolutionType::Sphere)
            .with_dimensions(Dimensions::sphere(self.radius));
        node.material.clone_from(&self.material);
        Ok(scene.insert(node))
    }
}
