use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, Point3, Vector3, TOLERANCE};

use super::rotation::axis_angle_matrix;

/// A rigid change of coordinate frame, parent -> local.
///
/// The frame is described by an origin and a basis whose columns are the
/// frame axes expressed in the parent frame. A point is mapped with
/// `local = basis^-1 * (point + shift)`, where `shift = -origin`. The inverse
/// basis is stored alongside the basis so that both directions cost a single
/// matrix-vector product.
///
/// [`compose`](Self::compose) and [`apply`](Self::apply) are pure.
/// [`rotate`](Self::rotate) and [`translate`](Self::translate) mutate the
/// frame in place and return it for chaining.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransform {
    shift: Vector3,
    basis: Matrix3,
    basis_inv: Matrix3,
}

impl FrameTransform {
    /// The identity frame: parent and local coordinates coincide.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            shift: Vector3::zeros(),
            basis: Matrix3::identity(),
            basis_inv: Matrix3::identity(),
        }
    }

    /// A frame with the parent's axes, placed at `origin`.
    #[must_use]
    pub fn translation(origin: &Vector3) -> Self {
        Self {
            shift: -origin,
            ..Self::identity()
        }
    }

    /// Creates a frame from an origin and three axis vectors.
    ///
    /// The axes need not be orthonormal, only linearly independent.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularBasis`] if the axes are linearly
    /// dependent.
    pub fn from_axes(origin: Point3, x: Vector3, y: Vector3, z: Vector3) -> Result<Self> {
        Self::from_basis(origin, Matrix3::from_columns(&[x, y, z]))
    }

    /// Creates a frame from an origin and a basis matrix (axes as columns).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularBasis`] if `basis` is not invertible.
    /// The test is relative to the axis lengths, so uniformly small or large
    /// bases are accepted.
    pub fn from_basis(origin: Point3, basis: Matrix3) -> Result<Self> {
        // |det| <= product of column norms, with equality for orthogonal axes.
        let scale: f64 = basis.column_iter().map(|c| c.norm()).product();
        let det = basis.determinant();
        if !det.is_finite() || det.abs() <= TOLERANCE * scale {
            return Err(GeometryError::SingularBasis.into());
        }
        let basis_inv = basis.try_inverse().ok_or(GeometryError::SingularBasis)?;
        Ok(Self {
            shift: -origin.coords,
            basis,
            basis_inv,
        })
    }

    /// Returns the frame equivalent to applying `inner` first, then `self`.
    ///
    /// Composition is associative but not commutative.
    #[must_use]
    pub fn compose(&self, inner: &FrameTransform) -> FrameTransform {
        // self(inner(p)) = A^-1 (B^-1 (p + s_b) + s_a)
        //                = (A^-1 B^-1) (p + s_b + B s_a)
        FrameTransform {
            shift: inner.shift + inner.basis * self.shift,
            basis: inner.basis * self.basis,
            basis_inv: self.basis_inv * inner.basis_inv,
        }
    }

    /// Maps a parent-frame point into local coordinates.
    #[must_use]
    pub fn apply(&self, point: &Point3) -> Point3 {
        Point3::from(self.basis_inv * (point.coords + self.shift))
    }

    /// Maps a parent-frame direction into local coordinates (no translation).
    #[must_use]
    pub fn apply_vector(&self, direction: &Vector3) -> Vector3 {
        self.basis_inv * direction
    }

    /// Maps a local point back into parent coordinates.
    #[must_use]
    pub fn inverse_apply(&self, local: &Point3) -> Point3 {
        Point3::from(self.basis * local.coords - self.shift)
    }

    /// Rotates the frame's axes about its own origin.
    ///
    /// The rotation axis is the direction of `axis_angle` and the angle is its
    /// magnitude, both in parent coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `axis_angle` has zero
    /// magnitude. The frame is left unchanged in that case.
    pub fn rotate(&mut self, axis_angle: &Vector3) -> Result<&mut Self> {
        let rotation = axis_angle_matrix(axis_angle)?;
        self.basis = rotation * self.basis;
        self.basis_inv *= rotation.transpose();
        Ok(self)
    }

    /// Moves the frame's origin by `displacement` in parent coordinates.
    pub fn translate(&mut self, displacement: &Vector3) -> &mut Self {
        self.shift -= displacement;
        self
    }

    /// Returns the frame's origin in parent coordinates.
    #[must_use]
    pub fn origin(&self) -> Point3 {
        Point3::from(-self.shift)
    }

    /// Returns the basis matrix (frame axes as columns, in parent coordinates).
    #[must_use]
    pub fn basis(&self) -> &Matrix3 {
        &self.basis
    }

    /// Returns frame axis `index` (0 = X, 1 = Y, 2 = Z) in parent coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    #[must_use]
    pub fn axis(&self, index: usize) -> Vector3 {
        self.basis.column(index).into_owned()
    }
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn skewed() -> FrameTransform {
        FrameTransform::from_axes(
            p(1.0, -2.0, 0.5),
            Vector3::new(1.0, 0.2, 0.0),
            Vector3::new(-0.3, 1.0, 0.4),
            Vector3::new(0.1, -0.2, 2.0),
        )
        .unwrap()
    }

    fn turned() -> FrameTransform {
        let mut t = FrameTransform::translation(&Vector3::new(0.0, 3.0, -1.0));
        t.rotate(&Vector3::new(0.3, 0.4, 1.1)).unwrap();
        t
    }

    fn shifted() -> FrameTransform {
        FrameTransform::translation(&Vector3::new(-4.0, 0.5, 2.0))
    }

    #[test]
    fn identity_leaves_points_alone() {
        let t = FrameTransform::identity();
        assert_eq!(t.apply(&p(1.0, 2.0, 3.0)), p(1.0, 2.0, 3.0));
    }

    #[test]
    fn origin_maps_to_local_zero() {
        let t = skewed();
        assert_abs_diff_eq!(t.apply(&t.origin()), Point3::origin(), epsilon = 1e-12);
        assert_abs_diff_eq!(t.origin(), p(1.0, -2.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn inverse_apply_undoes_apply() {
        let t = skewed();
        let q = p(0.3, 7.0, -2.0);
        assert_abs_diff_eq!(t.inverse_apply(&t.apply(&q)), q, epsilon = 1e-12);
    }

    #[test]
    fn compose_matches_sequential_application() {
        let a = skewed();
        let b = turned();
        let ab = a.compose(&b);
        for q in [p(0.0, 0.0, 0.0), p(1.0, 2.0, 3.0), p(-5.0, 0.1, 9.0)] {
            assert_abs_diff_eq!(ab.apply(&q), a.apply(&b.apply(&q)), epsilon = 1e-9);
        }
    }

    #[test]
    fn compose_is_associative() {
        let (a, b, d) = (skewed(), turned(), shifted());
        let left = a.compose(&b).compose(&d);
        let right = a.compose(&b.compose(&d));
        assert_abs_diff_eq!(left.origin(), right.origin(), epsilon = 1e-9);
        assert_abs_diff_eq!(left.basis(), right.basis(), epsilon = 1e-9);
        let q = p(2.0, -1.0, 0.25);
        assert_abs_diff_eq!(left.apply(&q), right.apply(&q), epsilon = 1e-9);
    }

    #[test]
    fn compose_is_not_commutative() {
        let a = turned();
        let b = shifted();
        let q = p(1.0, 1.0, 1.0);
        let ab = a.compose(&b).apply(&q);
        let ba = b.compose(&a).apply(&q);
        assert!((ab - ba).norm() > 1e-3);
    }

    #[test]
    fn rotate_turns_axes_about_origin() {
        let mut t = FrameTransform::translation(&Vector3::new(1.0, 0.0, 0.0));
        t.rotate(&Vector3::new(0.0, 0.0, FRAC_PI_2)).unwrap();

        assert_abs_diff_eq!(t.axis(0), Vector3::y(), epsilon = 1e-12);
        assert_abs_diff_eq!(t.origin(), p(1.0, 0.0, 0.0), epsilon = 1e-12);
        // A point one unit along the new X axis.
        assert_abs_diff_eq!(t.apply(&p(1.0, 1.0, 0.0)), p(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotate_rejects_zero_vector() {
        let mut t = skewed();
        let before = t.clone();
        assert!(t.rotate(&Vector3::zeros()).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn translate_moves_origin() {
        let mut t = skewed();
        t.translate(&Vector3::new(1.0, 1.0, 1.0))
            .translate(&Vector3::new(0.0, 0.0, -0.5));
        assert_abs_diff_eq!(t.origin(), p(2.0, -1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn apply_vector_ignores_translation() {
        let t = skewed();
        let v = Vector3::new(0.5, -1.0, 2.0);
        let through_points = t.apply(&(t.origin() + v)) - t.apply(&t.origin());
        assert_abs_diff_eq!(t.apply_vector(&v), through_points, epsilon = 1e-12);
        assert_abs_diff_eq!(t.apply_vector(&t.axis(1)), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn small_scale_basis_is_accepted() {
        let t = FrameTransform::from_axes(
            Point3::origin(),
            Vector3::new(1e-4, 0.0, 0.0),
            Vector3::new(0.0, 1e-4, 0.0),
            Vector3::new(0.0, 0.0, 1e-4),
        )
        .unwrap();
        assert_abs_diff_eq!(t.apply(&p(1e-4, 2e-4, 0.0)), p(1.0, 2.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn non_finite_axes_are_rejected() {
        let r = FrameTransform::from_axes(
            Point3::origin(),
            Vector3::new(f64::NAN, 0.0, 0.0),
            Vector3::y(),
            Vector3::z(),
        );
        assert!(r.is_err());
    }

    #[test]
    fn dependent_axes_are_rejected() {
        let r = FrameTransform::from_axes(
            Point3::origin(),
            Vector3::x(),
            Vector3::y(),
            Vector3::new(1.0, 1.0, 0.0),
        );
        assert!(matches!(
            r,
            Err(crate::error::MinimError::Geometry(GeometryError::SingularBasis))
        ));
    }
}
