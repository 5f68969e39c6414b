use crate::error::Result;
use crate::geometry::{Dimensions, SolutionCoordinate};
use crate::scene::{SceneGraph, SolutionId, SolutionNode, SolutionType};

/// Creates a solution of any kind without dimension checks.
///
/// Used for groups, assemblies, sketches and other non-primitive kinds.
pub struct MakeSolution {
    name: String,
    kind: SolutionType,
    coordinate: SolutionCoordinate,
    dimensions: Dimensions,
    parent: Option<SolutionId>,
}

impl MakeSolution {
    /// Creates a new `MakeSolution` operation at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SolutionType) -> Self {
        Self {
            name: name.into(),
            kind,
            coordinate: SolutionCoordinate::default(),
            dimensions: Dimensions::default(),
            parent: None,
        }
    }

    #[must_use]
    pub fn at(mut self, coordinate: SolutionCoordinate) -> Self {
        self.coordinate = coordinate;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Attaches the new solution under `parent`.
    #[must_use]
    pub fn under(mut self, parent: SolutionId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested parent is not in the scene. Nothing
    /// is inserted in that case.
    pub fn execute(&self, scene: &mut SceneGraph) -> Result<SolutionId> {
        if let Some(parent) = self.parent {
            scene.node(parent)?;
        }
        let node = SolutionNode::new(self.name.clone(), self.coordinate)
            .with_kind(self.kind)
            .with_dimensions(self.dimensions);
        let id = scene.insert(node);
        if let Some(parent) = self.parent {
            scene.add_child(parent, id)?;
        }
        Ok(id)
    }
}
