use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OperationError;

/// Kind of object a solution represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionType {
    #[default]
    Base,
    Point,
    Line,
    Circle,
    Plane,
    Box,
    Sphere,
    Cylinder,
    Solid,
    Assembly,
    Sketch,
    Feature,
    Custom,
}

impl SolutionType {
    pub const ALL: [Self; 13] = [
        Self::Base,
        Self::Point,
        Self::Line,
        Self::Circle,
        Self::Plane,
        Self::Box,
        Self::Sphere,
        Self::Cylinder,
        Self::Solid,
        Self::Assembly,
        Self::Sketch,
        Self::Feature,
        Self::Custom,
    ];

    /// Wire name, as written to project files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Point => "point",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Plane => "plane",
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Solid => "solid",
            Self::Assembly => "assembly",
            Self::Sketch => "sketch",
            Self::Feature => "feature",
            Self::Custom => "custom",
        }
    }

    /// Returns whether the kind is a primitive with a closed-form volume.
    #[must_use]
    pub fn is_primitive(self) -> bool {
        matches!(self, Self::Box | Self::Sphere | Self::Cylinder)
    }

    /// Parses a type name, falling back to [`SolutionType::Box`] for names
    /// that are not recognised.
    #[must_use]
    pub fn parse_or_box(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(name, "unknown solution type, defaulting to box");
            Self::Box
        })
    }
}

impl FromStr for SolutionType {
    type Err = OperationError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| OperationError::InvalidInput(format!("unknown solution type '{s}'")))
    }
}

impl fmt::Display for SolutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
