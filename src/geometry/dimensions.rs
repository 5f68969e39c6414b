use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Size parameters of a primitive shape.
///
/// Which fields are meaningful depends on the shape: a box uses
/// `width`, `height` and `depth`; a sphere uses `radius`; a cylinder uses
/// `radius` and `height`. `angle` is in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub radius: f64,
    pub length: f64,
    pub angle: f64,
}

impl Dimensions {
    /// Dimensions of a `width x height x depth` box.
    #[must_use]
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            ..Self::default()
        }
    }

    /// Dimensions of a sphere.
    #[must_use]
    pub fn sphere(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Dimensions of a cylinder.
    #[must_use]
    pub fn cylinder(radius: f64, height: f64) -> Self {
        Self {
            radius,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn box_volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    #[must_use]
    pub fn sphere_volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    #[must_use]
    pub fn cylinder_volume(&self) -> f64 {
        PI * self.radius.powi(2) * self.height
    }

    #[must_use]
    pub fn box_area(&self) -> f64 {
        2.0 * (self.width * self.height + self.height * self.depth + self.width * self.depth)
    }

    #[must_use]
    pub fn sphere_area(&self) -> f64 {
        4.0 * PI * self.radius.powi(2)
    }

    /// Lateral surface plus both caps.
    #[must_use]
    pub fn cylinder_area(&self) -> f64 {
        2.0 * PI * self.radius * (self.radius + self.height)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.width,
            self.height,
            self.depth,
            self.radius,
            self.length,
            self.angle,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Returns whether any field is negative or not finite.
    #[must_use]
    pub fn has_invalid_values(&self) -> bool {
        [
            self.width,
            self.height,
            self.depth,
            self.radius,
            self.length,
        ]
        .iter()
        .any(|v| !v.is_finite() || *v < 0.0)
            || !self.angle.is_finite()
    }
}
