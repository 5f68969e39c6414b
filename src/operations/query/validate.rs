use std::fmt;

use crate::error::Result;
use crate::scene::{SceneGraph, SolutionId, SolutionType};

/// A problem found while validating a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    EmptyName,
    NonFiniteCoordinate,
    InvalidDimensions,
    /// A box, sphere or cylinder with no extent.
    DegeneratePrimitive(SolutionType),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("name is required"),
            Self::NonFiniteCoordinate => f.write_str("coordinate contains non-finite values"),
            Self::InvalidDimensions => f.write_str("dimensions must be finite and non-negative"),
            Self::DegeneratePrimitive(kind) => write!(f, "{kind} has zero size"),
        }
    }
}

/// Collects the validation issues of a single solution.
pub struct Validate {
    solution: SolutionId,
}

impl Validate {
    /// Creates a new `Validate` query.
    #[must_use]
    pub fn new(solution: SolutionId) -> Self {
        Self { solution }
    }

    /// Executes the query. An empty list means the solution is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution is not in the scene.
    pub fn execute(&self, scene: &SceneGraph) -> Result<Vec<ValidationIssue>> {
        let node = scene.node(self.solution)?;
        let mut issues = Vec::new();

        if node.name.trim().is_empty() {
            issues.push(ValidationIssue::EmptyName);
        }
        if !node.coordinate.is_finite() {
            issues.push(ValidationIssue::NonFiniteCoordinate);
        }
        let d = &node.dimensions;
        if d.has_invalid_values() {
            issues.push(ValidationIssue::InvalidDimensions);
        }
        let degenerate = match node.kind {
            SolutionType::Box => d.width <= 0.0 || d.height <= 0.0 || d.depth <= 0.0,
            SolutionType::Sphere => d.radius <= 0.0,
            SolutionType::Cylinder => d.radius <= 0.0 || d.height <= 0.0,
            _ => false,
        };
        if degenerate {
            issues.push(ValidationIssue::DegeneratePrimitive(node.kind));
        }

        Ok(issues)
    }
}

/// Returns whether a solution passes [`Validate`].
pub struct IsValid {
    solution: SolutionId,
}

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(solution: SolutionId) -> Self {
        Self { solution }
    }

    /// Executes the validation, returning `true` if no issues are found.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution is not in the scene.
    pub fn execute(&self, scene: &SceneGraph) -> Result<bool> {
        Ok(Validate::new(self.solution).execute(scene)?.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Dimensions, SolutionCoordinate};
    use crate::operations::creation::MakeBox;
    use crate::scene::SolutionNode;

    #[test]
    fn fresh_box_is_valid() {
        let mut scene = SceneGraph::new();
        let id = MakeBox::new(SolutionCoordinate::default(), 1.0, 2.0, 3.0)
            .execute(&mut scene)
            .unwrap();
        assert!(IsValid::new(id).execute(&scene).unwrap());
    }

    #[test]
    fn reports_every_issue() {
        let mut scene = SceneGraph::new();
        let node = SolutionNode::new(" ", SolutionCoordinate::from_position(f64::NAN, 0.0, 0.0))
            .with_kind(SolutionType::Sphere)
            .with_dimensions(Dimensions::sphere(-1.0));
        let id = scene.insert(node);

        let issues = Validate::new(id).execute(&scene).unwrap();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::EmptyName,
                ValidationIssue::NonFiniteCoordinate,
                ValidationIssue::InvalidDimensions,
                ValidationIssue::DegeneratePrimitive(SolutionType::Sphere),
            ]
        );
        assert!(!IsValid::new(id).execute(&scene).unwrap());
    }

    #[test]
    fn base_solution_needs_no_dimensions() {
        let mut scene = SceneGraph::new();
        let id = scene.insert(SolutionNode::default());
        assert!(Validate::new(id).execute(&scene).unwrap().is_empty());
    }
}
