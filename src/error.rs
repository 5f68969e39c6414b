use thiserror::Error;

/// Top-level error type for the scene core.
#[derive(Debug, Error)]
pub enum SolutionError {
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Errors related to the parent/child structure of a scene.
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("solution not found: {0}")]
    NotFound(String),

    #[error("cannot attach {child} under {parent}: it would become its own ancestor")]
    Cycle { parent: String, child: String },
}

/// Errors related to scene operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to the solution module registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("module already registered: {0}")]
    Duplicate(String),

    #[error("unknown module: {0}")]
    UnknownModule(String),
}

/// Errors related to reading and writing project files.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid project format: {0}")]
    InvalidFormat(String),

    #[error("checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: String, computed: String },

    #[error("project file too large: {size} > {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("too many solutions: {count} > {max}")]
    TooManySolutions { count: usize, max: usize },

    #[error("solution '{name}' has a non-finite {field}")]
    NonFinite { name: String, field: &'static str },

    #[error("no solutions to save")]
    Empty,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`SolutionError`].
pub type Result<T> = std::result::Result<T, SolutionError>;
