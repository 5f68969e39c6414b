use chrono::Utc;

use crate::error::{ProjectError, Result};
use crate::scene::{PropertyValue, SceneGraph, SolutionId, SolutionNode};

use super::checksum;
use super::document::{
    Entity, ProjectDocument, ProjectMetadata, RecordMetadata, ShapeRecord, FORMAT_NAME,
    FORMAT_VERSION, RECORD_VERSION,
};

impl ProjectDocument {
    /// Recomputes and stores the checksum.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded.
    pub fn seal(&mut self) -> std::result::Result<(), ProjectError> {
        self.checksum = None;
        let value = serde_json::to_value(&*self)?;
        self.checksum = Some(checksum::compute(&value)?);
        Ok(())
    }
}

/// Builds a sealed project document from every solution in a scene.
///
/// Each hierarchy is written root first in pre-order, so a parent record
/// always precedes its children.
///
/// # Errors
///
/// Returns an error if a solution holds a NaN or infinite value, if the
/// scene links are inconsistent, or if the document cannot be encoded.
pub fn encode(scene: &SceneGraph, mut metadata: ProjectMetadata) -> Result<ProjectDocument> {
    let created_at = Utc::now().to_rfc3339();

    let mut solutions = Vec::with_capacity(scene.len());
    for root in scene.roots() {
        solutions.push(Entity::Solution(shape_record(scene, root, &created_at)?));
        for id in scene.descendants(root)? {
            solutions.push(Entity::Solution(shape_record(scene, id, &created_at)?));
        }
    }
    metadata.solutions_count = solutions.len();

    let mut document = ProjectDocument {
        format: FORMAT_NAME.into(),
        version: FORMAT_VERSION.into(),
        created_at,
        metadata,
        solutions,
        checksum: None,
    };
    document.seal()?;
    tracing::debug!(solutions = document.solutions.len(), "encoded project");
    Ok(document)
}

fn shape_record(scene: &SceneGraph, id: SolutionId, created_at: &str) -> Result<ShapeRecord> {
    let node = scene.node(id)?;
    check_finite(node)?;
    let parent_id = match node.parent() {
        Some(parent) => Some(scene.node(parent)?.uid().to_string()),
        None => None,
    };
    let children_ids = node
        .children()
        .iter()
        .map(|&child| scene.node(child).map(|c| c.uid().to_string()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(ShapeRecord {
        solution_type: node.kind.as_str().into(),
        name: node.name.clone(),
        coordinate: node.coordinate,
        dimensions: node.dimensions,
        material: node.material.clone(),
        metadata: RecordMetadata {
            created_at: Some(created_at.into()),
            version: Some(RECORD_VERSION.into()),
            id: Some(node.uid().to_string()),
        },
        parent_id,
        children_ids,
        visible: node.is_visible(),
        locked: node.is_locked(),
        properties: node.properties().clone(),
    })
}

/// JSON has no NaN or infinity, so such values cannot be written.
fn check_finite(node: &SolutionNode) -> std::result::Result<(), ProjectError> {
    let field = if !node.coordinate.is_finite() {
        "coordinate"
    } else if !node.dimensions.is_finite() {
        "dimension"
    } else if node
        .material
        .as_ref()
        .is_some_and(|m| !(m.density.is_finite() && m.transparency.is_finite()))
    {
        "material"
    } else if !node.properties().values().all(PropertyValue::is_finite) {
        "property"
    } else {
        return Ok(());
    };
    tracing::warn!(name = %node.name, field, "refusing to encode non-finite value");
    Err(ProjectError::NonFinite {
        name: node.name.clone(),
        field,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SolutionError;
    use crate::geometry::SolutionCoordinate;
    use crate::operations::creation::{MakeBox, MakeSolution, MakeSphere};
    use crate::scene::{Material, SolutionType};

    #[test]
    fn parents_precede_children() {
        let mut scene = SceneGraph::new();
        let ball = MakeSphere::new(SolutionCoordinate::default(), 1.0)
            .execute(&mut scene)
            .unwrap();
        let group = MakeSolution::new("group", SolutionType::Assembly)
            .execute(&mut scene)
            .unwrap();
        scene.add_child(group, ball).unwrap();

        let document = encode(&scene, ProjectMetadata::default()).unwrap();
        let names: Vec<_> = document
            .solutions
            .iter()
            .map(|e| match e {
                Entity::Solution(r) => r.name.clone(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(names, vec!["group", "Sphere"]);
        assert_eq!(document.metadata.solutions_count, 2);
    }

    #[test]
    fn records_link_by_uid() {
        let mut scene = SceneGraph::new();
        let part = MakeBox::new(SolutionCoordinate::default(), 1.0, 1.0, 1.0)
            .with_material(Material::steel())
            .execute(&mut scene)
            .unwrap();
        let group = MakeSolution::new("group", SolutionType::Assembly)
            .execute(&mut scene)
            .unwrap();
        scene.add_child(group, part).unwrap();
        let group_uid = scene.node(group).unwrap().uid().to_string();
        let part_uid = scene.node(part).unwrap().uid().to_string();

        let document = encode(&scene, ProjectMetadata::default()).unwrap();
        let Entity::Solution(group_record) = &document.solutions[0] else {
            panic!("expected a shape record");
        };
        let Entity::Solution(part_record) = &document.solutions[1] else {
            panic!("expected a shape record");
        };
        assert_eq!(group_record.children_ids, vec![part_uid.clone()]);
        assert_eq!(part_record.parent_id.as_deref(), Some(group_uid.as_str()));
        assert_eq!(part_record.metadata.id.as_deref(), Some(part_uid.as_str()));
        assert_eq!(part_record.solution_type, "box");
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut scene = SceneGraph::new();
        let id = MakeBox::new(SolutionCoordinate::default(), 1.0, 1.0, 1.0)
            .named("Bracket")
            .execute(&mut scene)
            .unwrap();

        scene.node_mut(id).unwrap().move_to(f64::INFINITY, 0.0, 0.0);
        let err = encode(&scene, ProjectMetadata::default()).unwrap_err();
        assert!(matches!(
            &err,
            SolutionError::Project(ProjectError::NonFinite { name, field: "coordinate" })
                if name == "Bracket"
        ));
        assert_eq!(err.to_string(), "solution 'Bracket' has a non-finite coordinate");

        scene.node_mut(id).unwrap().move_to(0.0, 0.0, 0.0);
        scene.node_mut(id).unwrap().set_property("load", f64::NAN);
        let err = encode(&scene, ProjectMetadata::default()).unwrap_err();
        assert!(matches!(
            err,
            SolutionError::Project(ProjectError::NonFinite { field: "property", .. })
        ));
    }

    #[test]
    fn document_is_sealed() {
        let mut scene = SceneGraph::new();
        scene.insert(crate::scene::SolutionNode::default());
        let document = encode(&scene, ProjectMetadata::named("demo")).unwrap();
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["format"], FORMAT_NAME);
        checksum::verify(&value).unwrap();
    }
}
