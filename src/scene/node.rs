use std::collections::BTreeMap;

use uuid::Uuid;

use crate::geometry::{Dimensions, SolutionCoordinate};

use super::{Material, PropertyValue, SolutionType};

slotmap::new_key_type! {
    /// Unique identifier for a solution in a scene graph.
    pub struct SolutionId;
}

/// A single object in the scene hierarchy.
///
/// The parent and child links are owned by the [`SceneGraph`](super::SceneGraph)
/// and can only be changed through it, which keeps both sides of every link
/// consistent.
#[derive(Debug, Clone)]
pub struct SolutionNode {
    pub name: String,
    /// Position and orientation relative to the parent.
    pub coordinate: SolutionCoordinate,
    pub kind: SolutionType,
    pub dimensions: Dimensions,
    pub material: Option<Material>,
    uid: Uuid,
    visible: bool,
    locked: bool,
    properties: BTreeMap<String, PropertyValue>,
    pub(super) parent: Option<SolutionId>,
    pub(super) children: Vec<SolutionId>,
}

impl SolutionNode {
    /// Creates a detached, visible, unlocked node with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, coordinate: SolutionCoordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            kind: SolutionType::Base,
            dimensions: Dimensions::default(),
            material: None,
            uid: Uuid::new_v4(),
            visible: true,
            locked: false,
            properties: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: SolutionType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Replaces the generated identifier, e.g. when restoring from a file.
    #[must_use]
    pub fn with_uid(mut self, uid: Uuid) -> Self {
        self.uid = uid;
        self
    }

    /// Copies everything except the identifier and the hierarchy links.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            uid: Uuid::new_v4(),
            parent: None,
            children: Vec::new(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn uid(&self) -> Uuid {
        self.uid
    }

    #[must_use]
    pub fn parent(&self) -> Option<SolutionId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[SolutionId] {
        &self.children
    }

    /// Human-readable kind label, e.g. `"box"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }

    // --- Local coordinate ---

    /// Sets the local position.
    pub fn move_to(&mut self, x: f64, y: f64, z: f64) {
        self.coordinate.x = x;
        self.coordinate.y = y;
        self.coordinate.z = z;
    }

    /// Offsets the local position.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.coordinate.x += dx;
        self.coordinate.y += dy;
        self.coordinate.z += dz;
    }

    pub fn set_orientation(&mut self, a: f64, b: f64, c: f64) {
        self.coordinate.a = a;
        self.coordinate.b = b;
        self.coordinate.c = c;
    }

    // --- Flags ---

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // --- Property bag ---

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Inserts or replaces a property, returning the previous value.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }
}

impl Default for SolutionNode {
    fn default() -> Self {
        Self::new("Solution", SolutionCoordinate::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_defaults() {
        let node = SolutionNode::default();
        assert_eq!(node.name, "Solution");
        assert!(node.is_visible());
        assert!(!node.is_locked());
        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
        assert_eq!(node.type_name(), "base");
    }

    #[test]
    fn identifiers_are_unique() {
        let a = SolutionNode::default();
        let b = SolutionNode::default();
        assert_ne!(a.uid(), b.uid());
    }

    #[test]
    fn move_translate_orient() {
        let mut node = SolutionNode::new("n", SolutionCoordinate::default());
        node.move_to(1.0, 2.0, 3.0);
        node.translate(1.0, -2.0, 0.5);
        node.set_orientation(2.0, 2.0, 2.0);
        assert_eq!(
            node.coordinate,
            SolutionCoordinate::new(2.0, 0.0, 3.5, 2.0, 2.0, 2.0)
        );
    }

    #[test]
    fn property_bag() {
        let mut node = SolutionNode::default();
        assert!(node.set_property("color", "red").is_none());
        let previous = node.set_property("color", "blue");
        assert_eq!(previous, Some(PropertyValue::Text("red".into())));
        assert_eq!(node.property("color").and_then(PropertyValue::as_text), Some("blue"));
        node.remove_property("color");
        assert!(node.property("color").is_none());
    }

    #[test]
    fn duplicate_gets_fresh_uid() {
        let mut node = SolutionNode::new("part", SolutionCoordinate::from_position(1.0, 0.0, 0.0))
            .with_kind(SolutionType::Sphere);
        node.set_locked(true);
        node.set_property("tag", 7_i64);
        let copy = node.duplicate();
        assert_ne!(copy.uid(), node.uid());
        assert_eq!(copy.name, "part");
        assert_eq!(copy.kind, SolutionType::Sphere);
        assert!(copy.is_locked());
        assert_eq!(copy.properties(), node.properties());
    }
}
