pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod project;
pub mod registry;
pub mod scene;

pub use error::{Result, SolutionError};
