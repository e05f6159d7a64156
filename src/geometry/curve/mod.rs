mod circle;
mod ellipse;

pub use circle::Circle;
pub use ellipse::{ellipse_of, Ellipse};

use std::sync::Arc;

use crate::error::Result;
use crate::math::{Vector2, VectorN};

/// A curve parametrized over `t in [0, 1]`.
///
/// Implementations are expected to be continuous; the approximator estimates
/// tangents by finite differences and gives meaningless results otherwise.
/// Any `Fn(f64) -> VectorN<D>` closure is a curve.
pub trait ParametricCurve<const D: usize> {
    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point cannot be computed, e.g. when a
    /// projected curve crosses the camera's focal plane.
    fn evaluate(&self, t: f64) -> Result<VectorN<D>>;
}

impl<F, const D: usize> ParametricCurve<D> for F
where
    F: Fn(f64) -> VectorN<D>,
{
    fn evaluate(&self, t: f64) -> Result<VectorN<D>> {
        Ok(self(t))
    }
}

/// Drops the third coordinate of a 3D curve.
///
/// Used to fit projected curves in the image plane, ignoring depth.
#[derive(Debug, Clone)]
pub struct Planar<C>(pub C);

impl<C: ParametricCurve<3>> ParametricCurve<2> for Planar<C> {
    fn evaluate(&self, t: f64) -> Result<Vector2> {
        let p = self.0.evaluate(t)?;
        Ok(Vector2::new(p.x, p.y))
    }
}

/// A shareable, type-erased 3D curve.
#[derive(Clone)]
pub struct SharedCurve(Arc<dyn ParametricCurve<3> + Send + Sync>);

impl SharedCurve {
    /// Wraps a curve for storage in a [`Primitive`](crate::primitive::Primitive).
    pub fn new(curve: impl ParametricCurve<3> + Send + Sync + 'static) -> Self {
        Self(Arc::new(curve))
    }
}

impl ParametricCurve<3> for SharedCurve {
    fn evaluate(&self, t: f64) -> Result<VectorN<3>> {
        self.0.evaluate(t)
    }
}

impl std::fmt::Debug for SharedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedCurve(..)")
    }
}
