use nalgebra::SMatrix;

use super::VectorN;

/// Threshold on `sin^2` of the angle between two line directions below which
/// they are treated as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Intersects the lines `p1 + s * d1` and `p2 + u * d2`.
///
/// Each line contributes the constraint `(I - d d^T) x = (I - d d^T) p`, the
/// projection of `x - p` onto the line's normal space. The two constraints are
/// stacked and solved in the least-squares sense. In 2D the projector is
/// `n n^T` for the line normal `n`, so this is exactly the system
/// `[n1; n2] x = [n1 . p1; n2 . p2]`. In 3D skew lines yield the midpoint of
/// their closest approach.
///
/// `d1` and `d2` must be unit vectors. Returns `None` if they are parallel.
#[must_use]
pub fn intersect_lines<const D: usize>(
    p1: &VectorN<D>,
    d1: &VectorN<D>,
    p2: &VectorN<D>,
    d2: &VectorN<D>,
) -> Option<VectorN<D>> {
    let cos = d1.dot(d2);
    if 1.0 - cos * cos < PARALLEL_TOLERANCE {
        return None;
    }

    let identity = SMatrix::<f64, D, D>::identity();
    let proj1 = identity - d1 * d1.transpose();
    let proj2 = identity - d2 * d2.transpose();

    let lhs = proj1 + proj2;
    let rhs = proj1 * p1 + proj2 * p2;
    lhs.try_inverse().map(|inv| inv * rhs)
}
