use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::ellipse::ellipse_of;
use super::Ellipse;

/// A full circle in 3D space.
///
/// Stored as a center and a radius vector whose direction is the circle's
/// normal and whose length is the radius. Sampling goes through the
/// [`Ellipse`] view returned by [`as_function`](Self::as_function).
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point3,
    radius: Vector3,
}

impl Circle {
    /// Creates a circle from its center and radius vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius vector is zero-length or not finite.
    pub fn new(center: Point3, radius: Vector3) -> Result<Self> {
        let len = radius.norm();
        if !len.is_finite() || len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { center, radius })
    }

    /// Creates a circle from its center, a normal direction and a scalar
    /// radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the normal is
    /// zero-length, or if either is not finite.
    pub fn from_normal(center: Point3, normal: Vector3, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        let len = normal.norm();
        if !len.is_finite() || len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            center,
            radius: normal * (radius / len),
        })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius.norm()
    }

    /// Returns the radius vector (normal scaled by radius).
    #[must_use]
    pub fn radius_vector(&self) -> &Vector3 {
        &self.radius
    }

    /// Returns the unit normal of the circle plane.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.radius / self.radius.norm()
    }

    /// Samples `n` points at equal angular steps of `2 * pi / n`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero.
    pub fn as_path(&self, n: usize) -> Result<Vec<Point3>> {
        self.as_function().as_path(n)
    }

    /// Returns the circle as a parametric curve over `[0, 1]`.
    #[must_use]
    pub fn as_function(&self) -> Ellipse {
        ellipse_of(self)
    }
}
