use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{ProjectError, Result};
use crate::scene::SceneGraph;

use super::decode::{decode_value, DecodedProject};
use super::document::{ProjectMetadata, FORMAT_NAME};
use super::encode::encode;

/// Bytes inspected by [`ProjectManager::validate_file`] when looking for the
/// format tag.
const HEADER_LEN: u64 = 1024;

/// Size limits applied when saving and loading projects.
#[derive(Debug, Clone, Copy)]
pub struct ProjectLimits {
    /// Largest project file accepted for loading, in bytes.
    pub max_file_size: u64,
    /// Largest number of solutions written to or read from a project.
    pub max_solutions: usize,
}

impl Default for ProjectLimits {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024,
            max_solutions: 10_000,
        }
    }
}

/// Summary of a project file, read without rebuilding the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInfo {
    pub format: String,
    pub version: String,
    pub created_at: String,
    pub metadata: ProjectMetadata,
    pub solutions_count: usize,
    pub file_size: u64,
}

/// Saves and loads project files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectManager {
    limits: ProjectLimits,
}

impl ProjectManager {
    /// Creates a manager with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets custom limits.
    #[must_use]
    pub fn with_limits(mut self, limits: ProjectLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn limits(&self) -> ProjectLimits {
        self.limits
    }

    /// Writes every solution of `scene` to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene is empty, exceeds the solution limit,
    /// holds a NaN or infinite value, or the file cannot be written. No file
    /// is created unless the document encodes.
    pub fn save(&self, scene: &SceneGraph, path: &Path, metadata: ProjectMetadata) -> Result<()> {
        if scene.is_empty() {
            return Err(ProjectError::Empty.into());
        }
        if scene.len() > self.limits.max_solutions {
            return Err(ProjectError::TooManySolutions {
                count: scene.len(),
                max: self.limits.max_solutions,
            }
            .into());
        }

        let document = encode(scene, metadata)?;
        let file = File::create(path).map_err(ProjectError::from)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document).map_err(ProjectError::from)?;
        writer.flush().map_err(ProjectError::from)?;

        tracing::info!(path = %path.display(), solutions = scene.len(), "project saved");
        Ok(())
    }

    /// Reads a project file and rebuilds its scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the file fails [`ProjectManager::validate_file`],
    /// holds more solutions than allowed, or does not decode.
    pub fn load(&self, path: &Path) -> Result<DecodedProject> {
        self.validate_file(path)?;
        let value = read_value(path)?;

        let count = value
            .get("solutions")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if count > self.limits.max_solutions {
            return Err(ProjectError::TooManySolutions {
                count,
                max: self.limits.max_solutions,
            }
            .into());
        }

        let project = decode_value(value)?;
        tracing::info!(path = %path.display(), solutions = project.scene.len(), "project loaded");
        Ok(project)
    }

    /// Checks that `path` exists, is within the size limit and carries the
    /// format tag near the start of the file.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first check that failed.
    pub fn validate_file(&self, path: &Path) -> Result<()> {
        let size = fs::metadata(path).map_err(ProjectError::from)?.len();
        if size > self.limits.max_file_size {
            return Err(ProjectError::TooLarge {
                size,
                max: self.limits.max_file_size,
            }
            .into());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if !matches!(extension.as_deref(), Some("json" | "3d_sol")) {
            tracing::warn!(path = %path.display(), "unexpected project file extension");
        }

        let mut header = Vec::new();
        File::open(path)
            .map_err(ProjectError::from)?
            .take(HEADER_LEN)
            .read_to_end(&mut header)
            .map_err(ProjectError::from)?;
        if !String::from_utf8_lossy(&header).contains(FORMAT_NAME) {
            return Err(ProjectError::InvalidFormat(format!(
                "{} does not look like a {FORMAT_NAME} file",
                path.display()
            ))
            .into());
        }
        Ok(())
    }

    /// Reads the header fields of a project file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file fails validation or is not valid JSON.
    pub fn project_info(&self, path: &Path) -> Result<ProjectInfo> {
        self.validate_file(path)?;
        let value = read_value(path)?;
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        let metadata = match value.get("metadata") {
            Some(meta) => serde_json::from_value(meta.clone()).map_err(ProjectError::from)?,
            None => ProjectMetadata::default(),
        };

        Ok(ProjectInfo {
            format: text("format"),
            version: text("version"),
            created_at: text("created_at"),
            metadata,
            solutions_count: value
                .get("solutions")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            file_size: fs::metadata(path).map_err(ProjectError::from)?.len(),
        })
    }
}

fn read_value(path: &Path) -> Result<Value> {
    let reader = BufReader::new(File::open(path).map_err(ProjectError::from)?);
    let value = serde_json::from_reader(reader).map_err(ProjectError::from)?;
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SolutionError;
    use crate::geometry::SolutionCoordinate;
    use crate::operations::creation::{MakeBox, MakeSphere};
    use crate::scene::Material;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_test_dir() -> PathBuf {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let pid = std::process::id();
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("thesolution_test_{pid}_{nonce}_{seq}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_scene() -> SceneGraph {
        let mut scene = SceneGraph::new();
        let cube = MakeBox::new(SolutionCoordinate::default(), 10.0, 10.0, 10.0)
            .named("Test Cube")
            .with_material(Material::steel())
            .execute(&mut scene)
            .unwrap();
        let ball = MakeSphere::new(SolutionCoordinate::from_position(15.0, 0.0, 0.0), 5.0)
            .named("Test Sphere")
            .with_material(Material::aluminum())
            .execute(&mut scene)
            .unwrap();
        scene.add_child(cube, ball).unwrap();
        scene
    }

    #[test]
    fn save_then_load() {
        let dir = temp_test_dir();
        let path = dir.join("project.json");
        let manager = ProjectManager::new();
        manager
            .save(&sample_scene(), &path, ProjectMetadata::named("demo").with_author("tester"))
            .unwrap();

        let project = manager.load(&path).unwrap();
        assert_eq!(project.scene.len(), 2);
        assert_eq!(project.metadata.author, "tester");
        let ball = project.scene.find_by_name("Test Sphere").unwrap();
        let cube = project.scene.find_by_name("Test Cube").unwrap();
        assert_eq!(project.scene.parent(ball).unwrap(), Some(cube));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn empty_scene_is_not_saved() {
        let dir = temp_test_dir();
        let path = dir.join("empty.json");
        let err = ProjectManager::new()
            .save(&SceneGraph::new(), &path, ProjectMetadata::default())
            .unwrap_err();
        assert!(matches!(err, SolutionError::Project(ProjectError::Empty)));
        assert!(!path.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn solution_limit_applies_to_save() {
        let dir = temp_test_dir();
        let manager = ProjectManager::new().with_limits(ProjectLimits {
            max_solutions: 1,
            ..ProjectLimits::default()
        });
        let err = manager
            .save(&sample_scene(), &dir.join("big.json"), ProjectMetadata::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SolutionError::Project(ProjectError::TooManySolutions { count: 2, max: 1 })
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn non_finite_coordinate_is_not_saved() {
        let dir = temp_test_dir();
        let path = dir.join("broken.json");
        let mut scene = sample_scene();
        let cube = scene.find_by_name("Test Cube").unwrap();
        scene.node_mut(cube).unwrap().move_to(f64::NAN, 0.0, 0.0);

        let err = ProjectManager::new()
            .save(&scene, &path, ProjectMetadata::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SolutionError::Project(ProjectError::NonFinite { field: "coordinate", .. })
        ));
        assert!(!path.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn size_limit_applies_to_load() {
        let dir = temp_test_dir();
        let path = dir.join("project.json");
        ProjectManager::new()
            .save(&sample_scene(), &path, ProjectMetadata::default())
            .unwrap();

        let tiny = ProjectManager::new().with_limits(ProjectLimits {
            max_file_size: 16,
            ..ProjectLimits::default()
        });
        assert!(matches!(
            tiny.load(&path),
            Err(SolutionError::Project(ProjectError::TooLarge { .. }))
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn foreign_file_fails_validation() {
        let dir = temp_test_dir();
        let path = dir.join("other.json");
        fs::write(&path, r#"{"format": "SomethingElse"}"#).unwrap();
        assert!(matches!(
            ProjectManager::new().validate_file(&path),
            Err(SolutionError::Project(ProjectError::InvalidFormat(_)))
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = temp_test_dir();
        let result = ProjectManager::new().load(&dir.join("missing.json"));
        assert!(matches!(result, Err(SolutionError::Project(ProjectError::Io(_)))));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn info_reads_header_fields() {
        let dir = temp_test_dir();
        let path = dir.join("project.json");
        ProjectManager::new()
            .save(&sample_scene(), &path, ProjectMetadata::named("info"))
            .unwrap();

        let info = ProjectManager::new().project_info(&path).unwrap();
        assert_eq!(info.format, FORMAT_NAME);
        assert_eq!(info.version, "1.0");
        assert_eq!(info.metadata.name, "info");
        assert_eq!(info.metadata.solutions_count, 2);
        assert_eq!(info.solutions_count, 2);
        assert_eq!(info.file_size, fs::metadata(&path).unwrap().len());
        fs::remove_dir_all(dir).unwrap();
    }
}
