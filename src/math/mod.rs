pub mod solve;
pub mod vector;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Fixed-dimension real vector, used where an operation works in 2D or 3D.
pub type VectorN<const D: usize> = nalgebra::SVector<f64, D>;

/// 3x3 matrix, used for frame bases.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
