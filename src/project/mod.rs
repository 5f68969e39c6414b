//! JSON project files.
//!
//! A project is a `TheSolution_JSON` document listing every solution of a
//! scene as a tagged [`Entity`], sealed with a SHA-256 checksum. Hierarchy
//! links are stored as the solutions' UUIDs.

pub mod checksum;
mod decode;
mod document;
mod encode;
mod manager;

pub use decode::{decode, decode_value, DecodedProject};
pub use document::{
    Entity, ProjectDocument, ProjectMetadata, RecordMetadata, ShapeRecord, FORMAT_NAME,
    FORMAT_VERSION, RECORD_VERSION,
};
pub use encode::encode;
pub use manager::{ProjectInfo, ProjectLimits, ProjectManager};
