use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Dimensions, SolutionCoordinate};
use crate::scene::{Material, PropertyValue};

/// Format tag written to every project file.
pub const FORMAT_NAME: &str = "TheSolution_JSON";

/// Current project file version.
pub const FORMAT_VERSION: &str = "1.0";

/// Version recorded on each shape record.
pub const RECORD_VERSION: &str = "1.0";

/// A complete project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub format: String,
    pub version: String,
    pub created_at: String,
    pub metadata: ProjectMetadata,
    pub solutions: Vec<Entity>,
    /// SHA-256 of the document without this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Descriptive information about a project.
///
/// Unknown keys are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    pub name: String,
    pub description: String,
    pub author: String,
    pub solutions_count: usize,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            name: "TheSolution Project".into(),
            description: String::new(),
            author: String::new(),
            solutions_count: 0,
            extra: BTreeMap::new(),
        }
    }
}

impl ProjectMetadata {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One entry of the `solutions` list, discriminated by its `"type"` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entity {
    SolutionCoordinate(SolutionCoordinate),
    Solution(ShapeRecord),
    Material(Material),
}

/// A serialized scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Wire name of the kind; unknown names load as boxes.
    pub solution_type: String,
    pub name: String,
    #[serde(default)]
    pub coordinate: SolutionCoordinate,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(default)]
    pub metadata: RecordMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_ids: Vec<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordMetadata {
    pub created_at: Option<String>,
    pub version: Option<String>,
    pub id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entities_are_tagged_by_type() {
        let entity = Entity::SolutionCoordinate(SolutionCoordinate::from_position(1.0, 2.0, 3.0));
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["type"], "SolutionCoordinate");
        assert_eq!(value["x"], 1.0);

        let material: Entity =
            serde_json::from_str(r#"{"type": "Material", "name": "Steel", "density": 7.85}"#)
                .unwrap();
        assert!(matches!(material, Entity::Material(m) if m.name == "Steel"));
    }

    #[test]
    fn unknown_entity_type_is_rejected() {
        let result = serde_json::from_str::<Entity>(r#"{"type": "Unknown", "data": "?"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn minimal_shape_record_fills_defaults() {
        let entity: Entity = serde_json::from_str(
            r#"{"type": "Solution", "solution_type": "sphere", "name": "Ball",
                "coordinate": {"type": "SolutionCoordinate", "x": 1.0}}"#,
        )
        .unwrap();
        let Entity::Solution(record) = entity else {
            panic!("expected a shape record");
        };
        assert!(record.visible);
        assert!(!record.locked);
        assert_eq!(record.coordinate, SolutionCoordinate::from_position(1.0, 0.0, 0.0));
        assert!(record.metadata.id.is_none());
    }

    #[test]
    fn metadata_keeps_extra_keys() {
        let meta: ProjectMetadata =
            serde_json::from_str(r#"{"name": "P", "units": "mm"}"#).unwrap();
        assert_eq!(meta.name, "P");
        assert_eq!(meta.extra["units"], "mm");
        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["units"], "mm");
    }
}
