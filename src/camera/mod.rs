mod projection;

pub use projection::{ProjectedCurve, Projection};

use tracing::trace;

use crate::error::{CameraError, Result};
use crate::math::{Point3, Vector2, Vector3};
use crate::transform::FrameTransform;

/// Focal distance used by [`Camera::from_polars`].
pub const DEFAULT_FOCAL_DISTANCE: f64 = 1.0;

/// Image-plane width and height used by [`Camera::from_polars`].
pub const DEFAULT_IMAGE_SIZE: f64 = 2.0;

/// A pinhole camera.
///
/// The camera frame has its origin at the optical center and looks down its
/// local -Z axis. The image plane sits `focal_distance` in front of the
/// optical center and spans `[-half_width, half_width] x [-half_height, half_height]`.
///
/// `translate`, `rotate`, `move_focal_plane` and the field-of-view setters
/// mutate the camera in place and return it for chaining. Projections are
/// pure.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    transform: FrameTransform,
    focal_distance: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    /// Creates a camera from the frame of its image plane.
    ///
    /// `orientation` places the image-plane center and its axes; the optical
    /// center is put `focal_distance` along the orientation's +Z axis, behind
    /// the image plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the focal distance or either image extent is not
    /// strictly positive.
    pub fn new(
        orientation: &FrameTransform,
        focal_distance: f64,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        check_focal_distance(focal_distance)?;
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            return Err(CameraError::InvalidImagePlane { width, height }.into());
        }

        let focal_shift = FrameTransform::translation(&Vector3::new(0.0, 0.0, focal_distance));
        Ok(Self {
            transform: focal_shift.compose(orientation),
            focal_distance,
            half_width: width / 2.0,
            half_height: height / 2.0,
        })
    }

    /// Places the camera on a sphere of radius `rho` around the world origin,
    /// looking at the origin.
    ///
    /// `theta` is the polar angle from +Z and `phi` the azimuth from +X. The
    /// image X axis follows increasing `phi` and the Y axis points towards the
    /// +Z pole; `radial` rolls both about the viewing axis. The camera uses
    /// [`DEFAULT_FOCAL_DISTANCE`] and a [`DEFAULT_IMAGE_SIZE`] square image.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting frame is degenerate (non-finite
    /// angles).
    pub fn from_polars(rho: f64, phi: f64, theta: f64, radial: f64) -> Result<Self> {
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        let (sin_r, cos_r) = radial.sin_cos();

        let r_hat = Vector3::new(sin_t * cos_p, sin_t * sin_p, cos_t);
        let theta_hat = Vector3::new(cos_t * cos_p, cos_t * sin_p, -sin_t);
        let phi_hat = Vector3::new(-sin_p, cos_p, 0.0);

        let right = phi_hat * cos_r - theta_hat * sin_r;
        let up = -phi_hat * sin_r - theta_hat * cos_r;

        let image_center = Point3::from(r_hat * (rho - DEFAULT_FOCAL_DISTANCE));
        let orientation = FrameTransform::from_axes(image_center, right, up, r_hat)?;
        trace!(rho, phi, theta, radial, "placing camera from polar angles");

        Self::new(
            &orientation,
            DEFAULT_FOCAL_DISTANCE,
            DEFAULT_IMAGE_SIZE,
            DEFAULT_IMAGE_SIZE,
        )
    }

    /// Returns the camera frame (origin at the optical center).
    #[must_use]
    pub fn transform(&self) -> &FrameTransform {
        &self.transform
    }

    /// Returns the frame of the image plane, `focal_distance` in front of the
    /// optical center.
    #[must_use]
    pub fn image_plane(&self) -> FrameTransform {
        FrameTransform::translation(&Vector3::new(0.0, 0.0, -self.focal_distance))
            .compose(&self.transform)
    }

    /// Returns the optical center in world coordinates.
    #[must_use]
    pub fn position(&self) -> Point3 {
        self.transform.origin()
    }

    /// Returns the unit viewing direction in world coordinates.
    #[must_use]
    pub fn view_direction(&self) -> Vector3 {
        -self.transform.axis(2).normalize()
    }

    /// Returns the focal distance.
    #[must_use]
    pub fn focal_distance(&self) -> f64 {
        self.focal_distance
    }

    /// Returns half the image-plane width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Returns half the image-plane height.
    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Horizontal field of view in radians.
    #[must_use]
    pub fn x_fov(&self) -> f64 {
        2.0 * (self.half_width / self.focal_distance).atan()
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn y_fov(&self) -> f64 {
        2.0 * (self.half_height / self.focal_distance).atan()
    }

    /// Sets the horizontal field of view by re-deriving the focal distance.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidFieldOfView`] unless `0 < fov < pi`.
    pub fn set_x_fov(&mut self, fov: f64) -> Result<&mut Self> {
        let focal_distance = focal_distance_for(self.half_width, fov)?;
        self.set_focal_distance(focal_distance)
    }

    /// Sets the vertical field of view by re-deriving the focal distance.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidFieldOfView`] unless `0 < fov < pi`.
    pub fn set_y_fov(&mut self, fov: f64) -> Result<&mut Self> {
        let focal_distance = focal_distance_for(self.half_height, fov)?;
        self.set_focal_distance(focal_distance)
    }

    /// Sets the focal distance, keeping the optical center in place.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::NonPositiveFocalDistance`] if `focal_distance`
    /// is not strictly positive.
    pub fn set_focal_distance(&mut self, focal_distance: f64) -> Result<&mut Self> {
        check_focal_distance(focal_distance)?;
        self.focal_distance = focal_distance;
        Ok(self)
    }

    /// Moves the image plane `delta` further from the optical center.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::NonPositiveFocalDistance`] if the plane would
    /// reach or cross the optical center.
    pub fn move_focal_plane(&mut self, delta: f64) -> Result<&mut Self> {
        self.set_focal_distance(self.focal_distance + delta)
    }

    /// Moves the camera by `displacement` in world coordinates.
    pub fn translate(&mut self, displacement: &Vector3) -> &mut Self {
        self.transform.translate(displacement);
        self
    }

    /// Rotates the camera about its optical center by an axis-angle vector.
    ///
    /// # Errors
    ///
    /// Returns an error if `axis_angle` has zero magnitude.
    pub fn rotate(&mut self, axis_angle: &Vector3) -> Result<&mut Self> {
        self.transform.rotate(axis_angle)?;
        Ok(self)
    }

    /// Returns the projection onto the image plane.
    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection::new(self.transform.clone(), self.focal_distance, None)
    }

    /// Returns the projection onto normalized device coordinates.
    #[must_use]
    pub fn ndc_projection(&self) -> Projection {
        Projection::new(
            self.transform.clone(),
            self.focal_distance,
            Some(Vector2::new(self.half_width, self.half_height)),
        )
    }

    /// Projects a world point onto the image plane.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::PointOnFocalPlane`] for points level with the
    /// optical center.
    pub fn project(&self, point: &Point3) -> Result<Point3> {
        self.projection().apply(point)
    }

    /// Projects a list of world points onto the image plane.
    ///
    /// # Errors
    ///
    /// Fails if any point lies level with the optical center.
    pub fn project_path(&self, points: &[Point3]) -> Result<Vec<Point3>> {
        self.projection().apply_path(points)
    }

    /// Projects a curve onto the image plane, lazily.
    #[must_use]
    pub fn project_curve<C>(&self, curve: C) -> ProjectedCurve<C> {
        self.projection().curve(curve)
    }

    /// Projects a world point into normalized device coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::PointOnFocalPlane`] for points level with the
    /// optical center.
    pub fn project_ndc(&self, point: &Point3) -> Result<Point3> {
        self.ndc_projection().apply(point)
    }

    /// Projects a list of world points into normalized device coordinates.
    ///
    /// # Errors
    ///
    /// Fails if any point lies level with the optical center.
    pub fn project_ndc_path(&self, points: &[Point3]) -> Result<Vec<Point3>> {
        self.ndc_projection().apply_path(points)
    }

    /// Projects a curve into normalized device coordinates, lazily.
    #[must_use]
    pub fn project_ndc_curve<C>(&self, curve: C) -> ProjectedCurve<C> {
        self.ndc_projection().curve(curve)
    }
}

fn check_focal_distance(focal_distance: f64) -> Result<()> {
    if focal_distance > 0.0 && focal_distance.is_finite() {
        Ok(())
    } else {
        Err(CameraError::NonPositiveFocalDistance(focal_distance).into())
    }
}

fn focal_distance_for(half_extent: f64, fov: f64) -> Result<f64> {
    if fov.is_nan() || fov <= 0.0 || fov >= std::f64::consts::PI {
        return Err(CameraError::InvalidFieldOfView(fov).into());
    }
    Ok(half_extent / (fov / 2.0).tan())
}
