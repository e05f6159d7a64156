use tracing::{debug, warn};

use crate::error::{ApproximationError, Result};
use crate::geometry::curve::ParametricCurve;
use crate::math::solve::intersect_lines;
use crate::math::vector::unit;
use crate::math::{VectorN, TOLERANCE};

use super::resample::{arc_length_breakpoints, dense_param};
use super::{ApproximationParams, ParallelTangents, PiecewiseQuadratic, QuadraticSegment};

/// A point on the curve and the unit tangent there.
#[derive(Debug, Clone, Copy)]
struct TangentLine<const D: usize> {
    t: f64,
    point: VectorN<D>,
    direction: VectorN<D>,
}

impl<const D: usize> TangentLine<D> {
    /// Estimates the tangent at `t` by second-order finite differences with
    /// step `h`: central inside the domain, three-point one-sided at the ends.
    fn estimate<C>(gamma: &C, t: f64, h: f64) -> Result<Self>
    where
        C: ParametricCurve<D> + ?Sized,
    {
        let point = gamma.evaluate(t)?;
        let derivative = if t <= 0.0 {
            (gamma.evaluate(h)? * 4.0 - point * 3.0 - gamma.evaluate(2.0 * h)?) / (2.0 * h)
        } else if t >= 1.0 {
            (point * 3.0 - gamma.evaluate(1.0 - h)? * 4.0 + gamma.evaluate(1.0 - 2.0 * h)?)
                / (2.0 * h)
        } else {
            (gamma.evaluate(t + h)? - gamma.evaluate(t - h)?) / (2.0 * h)
        };
        let direction = unit(&derivative).map_err(|_| ApproximationError::ZeroTangent { t })?;
        Ok(Self {
            t,
            point,
            direction,
        })
    }
}

/// Fits a chain of quadratic Bezier segments to a parametric curve.
///
/// Breakpoints are spaced by arc length (see [`ApproximationParams`]); each
/// segment's control point is the intersection of the tangent lines at its
/// two ends.
pub struct Approximate {
    params: ApproximationParams,
}

impl Approximate {
    /// Creates a new `Approximate` operation.
    #[must_use]
    pub fn new(params: ApproximationParams) -> Self {
        Self { params }
    }

    /// Executes the approximation.
    ///
    /// The result starts at `gamma(0)`, ends at `gamma(1)`, has
    /// `points - 1` segments and passes through every breakpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `points < 2`, `dts < points`, the curve has zero
    /// length or a vanishing tangent at a breakpoint, evaluation of `gamma`
    /// fails, a segment starts and ends at the same point, or two consecutive
    /// tangents are parallel under [`ParallelTangents::Fail`].
    pub fn execute<C, const D: usize>(&self, gamma: &C) -> Result<PiecewiseQuadratic<D>>
    where
        C: ParametricCurve<D> + ?Sized,
    {
        let ApproximationParams { points, dts, .. } = self.params;
        if points < 2 {
            return Err(ApproximationError::TooFewPoints(points).into());
        }
        if dts < points {
            return Err(ApproximationError::SamplingTooSparse { dts, points }.into());
        }

        let breakpoints = arc_length_breakpoints(gamma, points, dts)?;
        let h = dense_param(1, dts);
        let lines = breakpoints
            .params
            .iter()
            .map(|&t| TangentLine::estimate(gamma, t, h))
            .collect::<Result<Vec<_>>>()?;

        let segments = lines
            .windows(2)
            .map(|pair| -> Result<QuadraticSegment<D>> {
                Ok(QuadraticSegment {
                    control: self.control_point(&pair[0], &pair[1])?,
                    end: pair[1].point,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            length = breakpoints.length,
            segments = segments.len(),
            dts,
            "approximated curve with quadratic segments"
        );
        Ok(PiecewiseQuadratic::new(lines[0].point, segments))
    }

    fn control_point<const D: usize>(
        &self,
        from: &TangentLine<D>,
        to: &TangentLine<D>,
    ) -> Result<VectorN<D>> {
        // Repeated breakpoint on the dense grid.
        if to.t <= from.t {
            return Ok(from.point);
        }
        if (to.point - from.point).norm() < TOLERANCE {
            return Err(ApproximationError::ClosedSegment {
                t_start: from.t,
                t_end: to.t,
            }
            .into());
        }
        if let Some(control) =
            intersect_lines(&from.point, &from.direction, &to.point, &to.direction)
        {
            return Ok(control);
        }

        match self.params.parallel_tangents {
            ParallelTangents::Fail => Err(ApproximationError::ParallelTangents {
                t_start: from.t,
                t_end: to.t,
            }
            .into()),
            ParallelTangents::Midpoint => {
                warn!(
                    t_start = from.t,
                    t_end = to.t,
                    "parallel tangents, using midpoint control point"
                );
                Ok((from.point + to.point) / 2.0)
            }
        }
    }
}

/// Fits `points - 1` quadratic Bezier segments to `gamma` using `dts` dense
/// samples, failing on parallel tangents.
///
/// # Errors
///
/// See [`Approximate::execute`].
pub fn approximate<C, const D: usize>(
    gamma: &C,
    points: usize,
    dts: usize,
) -> Result<PiecewiseQuadratic<D>>
where
    C: ParametricCurve<D> + ?Sized,
{
    Approximate::new(ApproximationParams {
        points,
        dts,
        parallel_tangents: ParallelTangents::Fail,
    })
    .execute(gamma)
}
