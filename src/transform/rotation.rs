use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, Vector3, TOLERANCE};

/// Builds a 3x3 rotation matrix around a unit axis by an angle (Rodrigues).
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix3 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix3::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,
    )
}

/// Builds the rotation encoded by an axis-angle vector: the direction is the
/// axis and the magnitude is the angle in radians.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the vector has no magnitude, since
/// the axis is then undefined.
pub fn axis_angle_matrix(axis_angle: &Vector3) -> Result<Matrix3> {
    let angle = axis_angle.norm();
    if angle < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(rotation_matrix(&(axis_angle / angle), angle))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn quarter_turn_about_z() {
        let r = rotation_matrix(&Vector3::z(), FRAC_PI_2);
        assert_abs_diff_eq!(r * Vector3::x(), Vector3::y(), epsilon = 1e-12);
        assert_abs_diff_eq!(r * Vector3::y(), -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn result_is_orthonormal() {
        let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
        let r = rotation_matrix(&axis, 0.7);
        assert_abs_diff_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-12);
        assert!((r.determinant() - 1.0).abs() < 1e-12);
        // The axis itself is fixed.
        assert_abs_diff_eq!(r * axis, axis, epsilon = 1e-12);
    }

    #[test]
    fn axis_angle_uses_magnitude_as_angle() {
        let r = axis_angle_matrix(&Vector3::new(0.0, PI, 0.0)).unwrap();
        assert_abs_diff_eq!(r * Vector3::x(), -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn zero_axis_angle_is_rejected() {
        assert!(axis_angle_matrix(&Vector3::zeros()).is_err());
    }
}
