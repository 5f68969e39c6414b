use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::error::{ProjectError, Result};
use crate::scene::{SceneGraph, SolutionId, SolutionNode, SolutionType};

use super::checksum;
use super::document::{
    Entity, ProjectDocument, ProjectMetadata, ShapeRecord, FORMAT_NAME, FORMAT_VERSION,
};

/// A project rebuilt from a document.
#[derive(Debug)]
pub struct DecodedProject {
    pub scene: SceneGraph,
    /// Top-level solutions, in file order.
    pub roots: Vec<SolutionId>,
    pub metadata: ProjectMetadata,
    pub created_at: String,
    /// Standalone coordinate and material entries.
    pub extras: Vec<Entity>,
}

/// Validates and decodes a raw project value.
///
/// The format tag and the checksum are checked on the raw value, before it
/// is interpreted.
///
/// # Errors
///
/// Returns an error if the format tag is wrong, the checksum does not
/// match, the content does not describe a project, or the hierarchy links
/// form a cycle.
pub fn decode_value(value: Value) -> Result<DecodedProject> {
    let format = value.get("format").and_then(Value::as_str).unwrap_or_default();
    if format != FORMAT_NAME {
        let message = format!("expected {FORMAT_NAME}, found '{format}'");
        return Err(ProjectError::InvalidFormat(message).into());
    }
    checksum::verify(&value)?;
    let document: ProjectDocument = serde_json::from_value(value).map_err(ProjectError::from)?;
    decode(document)
}

/// Rebuilds the scene described by a document.
///
/// Nodes keep the identifiers stored in the file. Children are attached in
/// the order listed by `children_ids`; when a record's `parent_id`
/// disagrees, `parent_id` wins. References to unknown identifiers are
/// skipped with a warning.
///
/// # Errors
///
/// Returns an error if the format tag is wrong or the links form a cycle.
pub fn decode(document: ProjectDocument) -> Result<DecodedProject> {
    if document.format != FORMAT_NAME {
        return Err(ProjectError::InvalidFormat(document.format).into());
    }
    if document.version != FORMAT_VERSION {
        tracing::warn!(
            expected = FORMAT_VERSION,
            found = %document.version,
            "project version mismatch"
        );
    }

    let mut scene = SceneGraph::new();
    let mut by_key: HashMap<String, SolutionId> = HashMap::new();
    let mut links: Vec<(SolutionId, Option<String>, Vec<String>)> = Vec::new();
    let mut extras = Vec::new();

    for entity in document.solutions {
        match entity {
            Entity::Solution(record) => {
                let node = node_from_record(&record);
                let id = scene.insert(node);
                if let Some(key) = record.metadata.id {
                    if by_key.insert(key.clone(), id).is_some() {
                        tracing::warn!(%key, "duplicate solution id in project");
                    }
                }
                links.push((id, record.parent_id, record.children_ids));
            }
            other => extras.push(other),
        }
    }

    for (id, _, children) in &links {
        for key in children {
            match by_key.get(key) {
                Some(&child) => scene.add_child(*id, child)?,
                None => tracing::warn!(%key, "child id not found in project"),
            }
        }
    }
    for (id, parent, _) in &links {
        let Some(key) = parent else { continue };
        let Some(&parent) = by_key.get(key) else {
            tracing::warn!(%key, "parent id not found in project");
            continue;
        };
        if scene.parent(*id)? != Some(parent) {
            scene.add_child(parent, *id)?;
        }
    }

    let mut roots = Vec::new();
    for (id, _, _) in &links {
        if scene.parent(*id)?.is_none() {
            roots.push(*id);
        }
    }

    tracing::info!(
        solutions = scene.len(),
        roots = roots.len(),
        extras = extras.len(),
        "decoded project"
    );
    Ok(DecodedProject {
        scene,
        roots,
        metadata: document.metadata,
        created_at: document.created_at,
        extras,
    })
}

fn node_from_record(record: &ShapeRecord) -> SolutionNode {
    let mut node = SolutionNode::new(record.name.clone(), record.coordinate)
        .with_kind(SolutionType::parse_or_box(&record.solution_type))
        .with_dimensions(record.dimensions);
    node.material.clone_from(&record.material);
    if let Some(raw) = &record.metadata.id {
        match Uuid::parse_str(raw) {
            Ok(uid) => node = node.with_uid(uid),
            Err(_) => tracing::warn!(id = %raw, "solution id is not a UUID, generating a new one"),
        }
    }
    node.set_visible(record.visible);
    node.set_locked(record.locked);
    for (key, value) in &record.properties {
        node.set_property(key.clone(), value.clone());
    }
    node
}
