use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::vector::least_parallel_axis;
use crate::math::{Point3, Vector3, VectorN, TOLERANCE};

use super::{Circle, ParametricCurve};

/// A closed ellipse in 3D space.
///
/// `P(theta) = center + axis1 * cos(theta) + axis2 * sin(theta)`
/// with `axis1` perpendicular to `axis2`. As a [`ParametricCurve`] the angle
/// is `theta = 2 * pi * t` for `t in [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    center: Point3,
    axis1: Vector3,
    axis2: Vector3,
}

impl Ellipse {
    /// Creates a new ellipse from its center and two conjugate semi-axes.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis is zero-length or not finite, or the
    /// axes are not perpendicular.
    pub fn new(center: Point3, axis1: Vector3, axis2: Vector3) -> Result<Self> {
        let len1 = axis1.norm();
        let len2 = axis2.norm();
        if !(len1.is_finite() && len2.is_finite()) || len1 < TOLERANCE || len2 < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        if axis1.dot(&axis2).abs() > TOLERANCE * len1 * len2 {
            return Err(
                GeometryError::Degenerate("ellipse axes must be perpendicular".into()).into(),
            );
        }
        Ok(Self {
            center,
            axis1,
            axis2,
        })
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the semi-axis at `theta = 0`.
    #[must_use]
    pub fn axis1(&self) -> &Vector3 {
        &self.axis1
    }

    /// Returns the semi-axis at `theta = pi / 2`.
    #[must_use]
    pub fn axis2(&self) -> &Vector3 {
        &self.axis2
    }

    /// Evaluates the ellipse at angle `theta` (radians).
    #[must_use]
    pub fn point_at_angle(&self, theta: f64) -> Point3 {
        self.center + self.axis1 * theta.cos() + self.axis2 * theta.sin()
    }

    /// Samples `n` points at equal angular steps of `2 * pi / n`, starting at
    /// `axis1` and turning towards `axis2`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero.
    pub fn as_path(&self, n: usize) -> Result<Vec<Point3>> {
        if n == 0 {
            return Err(
                GeometryError::Degenerate("path needs at least one sample".into()).into(),
            );
        }
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / n as f64;
        #[allow(clippy::cast_precision_loss)]
        let points = (0..n).map(|i| self.point_at_angle(step * i as f64)).collect();
        Ok(points)
    }
}

impl ParametricCurve<3> for Ellipse {
    fn evaluate(&self, t: f64) -> Result<VectorN<3>> {
        Ok(self.point_at_angle(TAU * t).coords)
    }
}

impl From<&Circle> for Ellipse {
    fn from(circle: &Circle) -> Self {
        ellipse_of(circle)
    }
}

/// Derives the ellipse view of a circle.
///
/// `axis1` is whichever of the world X or Y axis is least parallel to the
/// circle's normal (X on ties), with its normal component removed and scaled
/// to the radius. `axis2 = normal x axis1`. The choice is deterministic so
/// that sampled paths are reproducible.
#[must_use]
pub fn ellipse_of(circle: &Circle) -> Ellipse {
    let normal = circle.normal();
    let reference = least_parallel_axis(&normal);
    let in_plane = reference - normal * reference.dot(&normal);
    let axis1 = in_plane * (circle.radius() / in_plane.norm());
    let axis2 = normal.cross(&axis1);
    Ellipse {
        center: *circle.center(),
        axis1,
        axis2,
    }
}
