use tracing::trace;

use crate::camera::{Camera, ProjectedCurve};
use crate::error::{GeometryError, Result};
use crate::geometry::curve::{Circle, Ellipse};
use crate::math::{Point3, TOLERANCE};

/// A sphere in 3D space.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or not finite.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("sphere radius must be positive".into()).into(),
            );
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Computes the apparent contour of the sphere seen from `eye`.
    ///
    /// The contour is the circle where sightlines from `eye` are tangent to
    /// the sphere. With `rel = center - eye`, `d = |rel|` and `q = r^2 / d^2`
    /// it has center `eye + (1 - q) * rel`, radius `sqrt(r^2 - q^2 d^2)` and
    /// normal along `rel`. It lies between the sphere's center and its near
    /// surface and is always smaller than the sphere.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ViewpointInsideSphere`] if `eye` is inside
    /// or on the sphere, and [`GeometryError::Degenerate`] if `eye` or the
    /// center has a non-finite coordinate.
    pub fn silhouette(&self, eye: &Point3) -> Result<Circle> {
        let rel = self.center - eye;
        let distance = rel.norm();
        if !distance.is_finite() {
            return Err(GeometryError::Degenerate("viewpoint must be finite".into()).into());
        }
        if distance - self.radius < TOLERANCE {
            return Err(GeometryError::ViewpointInsideSphere {
                distance,
                radius: self.radius,
            }
            .into());
        }

        let q = (self.radius * self.radius) / (distance * distance);
        let center = eye + rel * (1.0 - q);
        let radius = (self.radius * self.radius - q * q * distance * distance).sqrt();
        trace!(distance, radius, "sphere silhouette");

        Circle::from_normal(center, rel, radius)
    }

    /// Returns the silhouette as seen by `camera`, projected onto its image
    /// plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera's optical center is inside the sphere.
    pub fn contour(&self, camera: &Camera) -> Result<ProjectedCurve<Ellipse>> {
        let silhouette = self.silhouette(&camera.position())?;
        Ok(camera.project_curve(silhouette.as_function()))
    }

    /// Returns the silhouette as seen by `camera`, in normalized device
    /// coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera's optical center is inside the sphere.
    pub fn contour_ndc(&self, camera: &Camera) -> Result<ProjectedCurve<Ellipse>> {
        let silhouette = self.silhouette(&camera.position())?;
        Ok(camera.project_ndc_curve(silhouette.as_function()))
    }
}
