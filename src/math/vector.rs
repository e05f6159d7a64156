use crate::error::{GeometryError, Result};

use super::{Vector3, VectorN, TOLERANCE};

/// Builds a fixed-dimension vector from a raw component list.
///
/// # Errors
///
/// Returns [`GeometryError::DimensionMismatch`] if `components` does not
/// hold exactly `D` values.
pub fn from_components<const D: usize>(components: &[f64]) -> Result<VectorN<D>> {
    if components.len() != D {
        return Err(GeometryError::DimensionMismatch {
            expected: D,
            found: components.len(),
        }
        .into());
    }
    Ok(VectorN::<D>::from_column_slice(components))
}

/// Returns `v` scaled to unit length.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `v` is shorter than [`TOLERANCE`].
pub fn unit<const D: usize>(v: &VectorN<D>) -> Result<VectorN<D>> {
    v.try_normalize(TOLERANCE)
        .ok_or_else(|| GeometryError::ZeroVector.into())
}

/// Picks whichever of the world X or Y axis is least parallel to `direction`.
///
/// Ties go to X.
#[must_use]
pub fn least_parallel_axis(direction: &Vector3) -> Vector3 {
    if direction.x.abs() <= direction.y.abs() {
        Vector3::x()
    } else {
        Vector3::y()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn from_components_matches_dimension() {
        let v: VectorN<3> = from_components(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));

        let w: VectorN<2> = from_components(&[4.0, 5.0]).unwrap();
        assert_eq!(w, Vector2::new(4.0, 5.0));
    }

    #[test]
    fn from_components_rejects_wrong_length() {
        let r = from_components::<3>(&[1.0, 2.0]);
        assert!(matches!(
            r,
            Err(crate::error::MinimError::Geometry(
                GeometryError::DimensionMismatch { expected: 3, found: 2 }
            ))
        ));
    }

    #[test]
    fn unit_rejects_zero() {
        assert!(unit(&Vector3::zeros()).is_err());
        let u = unit(&Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((u.norm() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn least_parallel_axis_prefers_x_on_tie() {
        assert_eq!(least_parallel_axis(&Vector3::z()), Vector3::x());
        assert_eq!(least_parallel_axis(&Vector3::new(1.0, 1.0, 0.0)), Vector3::x());
    }

    #[test]
    fn least_parallel_axis_avoids_normal() {
        assert_eq!(least_parallel_axis(&Vector3::x()), Vector3::y());
        assert_eq!(least_parallel_axis(&Vector3::new(0.2, 0.9, 0.1)), Vector3::x());
    }
}
