use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::math::{approx_eq, Matrix4, Point3, Vector3};

/// Position and orientation of a solution relative to its parent.
///
/// `x, y, z` are a translation. `a, b, c` are per-axis scale factors and
/// compose multiplicatively down the hierarchy, so the identity orientation
/// is `(1, 1, 1)`.
///
/// Equality is tolerant: two coordinates are equal when every field differs
/// by less than [`COORDINATE_TOLERANCE`](crate::math::COORDINATE_TOLERANCE).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for SolutionCoordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)
    }
}

impl SolutionCoordinate {
    /// Creates a coordinate from all six fields.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64) -> Self {
        Self { x, y, z, a, b, c }
    }

    /// Creates a coordinate at the given position with identity orientation.
    #[must_use]
    pub fn from_position(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            ..Self::default()
        }
    }

    /// Returns the position as a point.
    #[must_use]
    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Returns the orientation (per-axis scale) as a vector.
    #[must_use]
    pub fn orientation(&self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Returns the position as an `(x, y, z)` tuple.
    #[must_use]
    pub fn position_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Returns the orientation as an `(a, b, c)` tuple.
    #[must_use]
    pub fn orientation_tuple(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Returns whether all six fields are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.z, self.a, self.b, self.c]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Euclidean distance between the two positions. Orientation is ignored.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.position(), &other.position())
    }

    /// Returns the homogeneous transform: scale by `(a, b, c)`, then
    /// translate by `(x, y, z)`.
    #[must_use]
    pub fn transformation_matrix(&self) -> Matrix4 {
        Matrix4::new_translation(&self.position().coords)
            * Matrix4::new_nonuniform_scaling(&self.orientation())
    }
}

impl Add for SolutionCoordinate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.a * other.a,
            self.b * other.b,
            self.c * other.c,
        )
    }
}

impl Sub for SolutionCoordinate {
    type Output = Self;

    /// Inverse of [`Add`]. A zero orientation component on the right keeps
    /// the left component unchanged instead of dividing by zero.
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            divide_or_keep(self.a, other.a),
            divide_or_keep(self.b, other.b),
            divide_or_keep(self.c, other.c),
        )
    }
}

fn divide_or_keep(lhs: f64, rhs: f64) -> f64 {
    if rhs == 0.0 {
        lhs
    } else {
        lhs / rhs
    }
}

impl PartialEq for SolutionCoordinate {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.z, other.z)
            && approx_eq(self.a, other.a)
            && approx_eq(self.b, other.b)
            && approx_eq(self.c, other.c)
    }
}

impl fmt::Display for SolutionCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SolutionCoordinate(x={}, y={}, z={}, a={}, b={}, c={})",
            self.x, self.y, self.z, self.a, self.b, self.c
        )
    }
}
