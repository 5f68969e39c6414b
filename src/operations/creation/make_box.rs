use crate::error::{OperationError, Result};
use crate::geometry::{Dimensions, SolutionCoordinate};
use crate::scene::{Material, SceneGraph, SolutionId, SolutionNode, SolutionType};

/// Creates a box solution.
pub struct MakeBox {
    coordinate: SolutionCoordinate,
    width: f64,
    height: f64,
    depth: f64,
    name: String,
    material: Option<Material>,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(coordinate: SolutionCoordinate, width: f64, height: f64, depth: f64) -> Self {
        Self {
            coordinate,
            width,
            height,
            depth,
            name: "Box".into(),
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

    /// Executes the operation, inserting the box as a detached root.
    ///
    /// # Errors
    ///
    /// Returns an error if any side length is not strictly positive.
    pub fn execute(&self, scene: &mut SceneGraph) -> Result<SolutionId> {
        for (label, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(
                    OperationError::InvalidInput(format!("box {label} must be positive")).into(),
                );
            }
        }

        let mut node = SolutionNode::new(self.name.clone(), self.coordinate)
            .with_kind(SolutionType::Box)
            .with_dimensions(Dimensions::cuboid(self.width, self.height, self.depth));
        node.material.clone_from(&self.material);
        Ok(scene.insert(node))
    }
}
