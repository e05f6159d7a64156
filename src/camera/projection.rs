use crate::error::{CameraError, Result};
use crate::geometry::curve::ParametricCurve;
use crate::math::{Point3, Vector2, VectorN, TOLERANCE};
use crate::transform::FrameTransform;

/// The state needed to project a world point: the camera frame (origin at
/// the optical center, looking down -Z), the focal distance, and, for
/// normalized device coordinates, the image-plane half extents.
///
/// A `Projection` is a plain value; curves projected through it own a copy
/// and never observe later changes to the camera it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    transform: FrameTransform,
    focal_distance: f64,
    half_extents: Option<Vector2>,
}

impl Projection {
    pub(crate) fn new(
        transform: FrameTransform,
        focal_distance: f64,
        half_extents: Option<Vector2>,
    ) -> Self {
        Self {
            transform,
            focal_distance,
            half_extents,
        }
    }

    /// Returns the focal distance.
    #[must_use]
    pub fn focal_distance(&self) -> f64 {
        self.focal_distance
    }

    /// Returns whether X and Y are divided by the half extents.
    #[must_use]
    pub fn is_ndc(&self) -> bool {
        self.half_extents.is_some()
    }

    /// Projects a world point.
    ///
    /// Returns `(x / z', y / z', z')` where `z' = -z / focal_distance` is the
    /// scaled depth in camera coordinates, and X and Y are additionally divided
    /// by the half extents in NDC mode. The depth is never normalized.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::PointOnFocalPlane`] if the point lies in the
    /// plane through the optical center, where the divide is undefined.
    pub fn apply(&self, point: &Point3) -> Result<Point3> {
        let local = self.transform.apply(point);
        let depth = -local.z / self.focal_distance;
        if depth.abs() < TOLERANCE {
            return Err(CameraError::PointOnFocalPlane.into());
        }

        let mut x = local.x / depth;
        let mut y = local.y / depth;
        if let Some(half) = &self.half_extents {
            x /= half.x;
            y /= half.y;
        }
        Ok(Point3::new(x, y, depth))
    }

    /// Projects every point of a path.
    ///
    /// # Errors
    ///
    /// Fails on the first point that lies on the focal plane.
    pub fn apply_path(&self, points: &[Point3]) -> Result<Vec<Point3>> {
        points.iter().map(|p| self.apply(p)).collect()
    }

    /// Wraps a curve so that it is projected lazily on evaluation.
    #[must_use]
    pub fn curve<C>(self, curve: C) -> ProjectedCurve<C> {
        ProjectedCurve {
            curve,
            projection: self,
        }
    }
}

/// A 3D curve seen through a [`Projection`].
///
/// Each evaluation projects a single point; the 3D samples are never stored.
#[derive(Debug, Clone)]
pub struct ProjectedCurve<C> {
    curve: C,
    projection: Projection,
}

impl<C> ProjectedCurve<C> {
    /// Returns the underlying world-space curve.
    #[must_use]
    pub fn source(&self) -> &C {
        &self.curve
    }

    /// Returns the projection applied on evaluation.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}

impl<C: ParametricCurve<3>> ParametricCurve<3> for ProjectedCurve<C> {
    fn evaluate(&self, t: f64) -> Result<VectorN<3>> {
        let world = Point3::from(self.curve.evaluate(t)?);
        Ok(self.projection.apply(&world)?.coords)
    }
}
