use tracing::debug;

use crate::approximation::{Approximate, ApproximationParams, PiecewiseQuadratic};
use crate::camera::Camera;
use crate::error::Result;
use crate::geometry::curve::{Circle, Planar, SharedCurve};
use crate::geometry::surface::Sphere;
use crate::math::Point2;

/// Parameters controlling how primitives are turned into outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineParams {
    /// Number of polyline samples for circles.
    pub circle_samples: usize,
    /// Approximation settings for smooth curves.
    pub approximation: ApproximationParams,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            circle_samples: 64,
            approximation: ApproximationParams::default(),
        }
    }
}

/// A scene primitive that can be drawn through a camera.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// A circle, drawn as a projected polyline.
    Circle(Circle),
    /// A sphere, drawn by its silhouette.
    Sphere(Sphere),
    /// An arbitrary world-space curve over `[0, 1]`.
    Curve(SharedCurve),
}

/// Projected geometry in normalized device coordinates, ready for a vector
/// serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// A closed polygon through the sampled points.
    Polyline(Vec<Point2>),
    /// A chain of quadratic Bezier segments.
    Quadratic(PiecewiseQuadratic<2>),
}

impl Primitive {
    /// Projects the primitive through `camera` into NDC.
    ///
    /// Circles are sampled at fixed angular steps and projected point by
    /// point. Sphere silhouettes and curves are projected lazily and fitted
    /// with quadratic Bezier segments in the image plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera is inside a sphere, geometry crosses the
    /// camera's focal plane, or the approximation fails.
    pub fn outline(&self, camera: &Camera, params: &OutlineParams) -> Result<Outline> {
        let fitter = Approximate::new(params.approximation);
        let outline = match self {
            Primitive::Circle(circle) => {
                let path = camera.project_ndc_path(&circle.as_path(params.circle_samples)?)?;
                Outline::Polyline(path.iter().map(|p| Point2::new(p.x, p.y)).collect())
            }
            Primitive::Sphere(sphere) => {
                let contour = Planar(sphere.contour_ndc(camera)?);
                Outline::Quadratic(fitter.execute(&contour)?)
            }
            Primitive::Curve(curve) => {
                let projected = Planar(camera.project_ndc_curve(curve.clone()));
                Outline::Quadratic(fitter.execute(&projected)?)
            }
        };
        debug!(kind = self.kind(), "outlined primitive");
        Ok(outline)
    }

    fn kind(&self) -> &'static str {
        match self {
            Primitive::Circle(_) => "circle",
            Primitive::Sphere(_) => "sphere",
            Primitive::Curve(_) => "curve",
        }
    }
}

impl From<Circle> for Primitive {
    fn from(circle: Circle) -> Self {
        Primitive::Circle(circle)
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<SharedCurve> for Primitive {
    fn from(curve: SharedCurve) -> Self {
        Primitive::Curve(curve)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, MinimError};
    use crate::math::{Point3, Vector3};
    use std::f64::consts::FRAC_PI_2;
    use std::thread;

    fn camera() -> Camera {
        Camera::from_polars(6.0, 0.3, 1.2, 0.0).unwrap()
    }

    fn scene() -> Vec<Primitive> {
        vec![
            Circle::from_normal(Point3::origin(), Vector3::z(), 1.0)
                .unwrap()
                .into(),
            Sphere::new(Point3::new(0.5, 0.0, 0.5), 1.0).unwrap().into(),
            SharedCurve::new(|t: f64| Vector3::new(t - 0.5, (3.0 * t).sin(), t * t)).into(),
        ]
    }

    #[test]
    fn circle_becomes_polyline() {
        let params = OutlineParams {
            circle_samples: 12,
            ..OutlineParams::default()
        };
        let outline = scene()[0].outline(&camera(), &params).unwrap();
        match outline {
            Outline::Polyline(points) => assert_eq!(points.len(), 12),
            Outline::Quadratic(_) => panic!("expected polyline"),
        }
    }

    #[test]
    fn sphere_becomes_closed_quadratic_chain() {
        let params = OutlineParams::default();
        let outline = scene()[1].outline(&camera(), &params).unwrap();
        let Outline::Quadratic(chain) = outline else {
            panic!("expected quadratic chain");
        };
        assert_eq!(chain.segment_count(), params.approximation.points - 1);
        assert!((chain.start() - chain.end()).norm() < 1e-9);
    }

    #[test]
    fn sphere_outline_matches_tangent_cone() {
        // Camera on the X axis at distance 4, sphere of radius 2 at the origin.
        let camera = Camera::from_polars(4.0, 0.0, FRAC_PI_2, 0.0).unwrap();
        let sphere = Primitive::Sphere(Sphere::new(Point3::origin(), 2.0).unwrap());
        let Outline::Quadratic(chain) = sphere.outline(&camera, &OutlineParams::default()).unwrap()
        else {
            panic!("expected quadratic chain");
        };
        // Half-angle 30 degrees at focal distance 1.
        let expected = 1.0 / 3.0_f64.sqrt();
        for (start, _) in chain.iter() {
            assert!((start.norm() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn camera_inside_sphere_fails() {
        let camera = Camera::from_polars(0.2, 0.0, 0.0, 0.0).unwrap();
        let sphere = Primitive::Sphere(Sphere::new(Point3::origin(), 1.0).unwrap());
        assert!(matches!(
            sphere.outline(&camera, &OutlineParams::default()),
            Err(MinimError::Geometry(GeometryError::ViewpointInsideSphere { .. }))
        ));
    }

    #[test]
    fn independent_primitives_outline_in_parallel() {
        let camera = camera();
        let params = OutlineParams::default();
        let sequential: Vec<Outline> = scene()
            .iter()
            .map(|p| p.outline(&camera, &params).unwrap())
            .collect();

        let parallel: Vec<Outline> = thread::scope(|s| {
            let handles: Vec<_> = scene()
                .into_iter()
                .map(|p| {
                    let camera = &camera;
                    let params = &params;
                    s.spawn(move || p.outline(camera, params).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
    }
}
