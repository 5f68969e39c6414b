/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Absolute tolerance used when comparing coordinates.
pub const COORDINATE_TOLERANCE: f64 = 1e-6;

/// Returns whether `a` and `b` differ by less than [`COORDINATE_TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < COORDINATE_TOLERANCE
}
