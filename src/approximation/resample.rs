use crate::error::{GeometryError, Result};
use crate::geometry::curve::ParametricCurve;
use crate::math::TOLERANCE;

/// Breakpoint parameters spaced approximately equally by arc length.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Breakpoints {
    /// Parameters in `[0, 1]`, non-decreasing, first `0` and last `1`.
    pub params: Vec<f64>,
    /// Polyline estimate of the curve's arc length.
    pub length: f64,
}

/// Parameter of dense sample `i` out of `dts` steps.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn dense_param(i: usize, dts: usize) -> f64 {
    i as f64 / dts as f64
}

/// Samples `gamma` at `dts` equal parameter steps and picks `points`
/// breakpoints, endpoints included, spaced by `length / (points - 1)` along
/// the sampled polyline.
///
/// An interior breakpoint is placed at the first dense sample whose
/// accumulated chord length reaches its target, so breakpoints fall on the
/// dense grid.
///
/// Callers guarantee `points >= 2` and `dts >= points`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn arc_length_breakpoints<C, const D: usize>(
    gamma: &C,
    points: usize,
    dts: usize,
) -> Result<Breakpoints>
where
    C: ParametricCurve<D> + ?Sized,
{
    let samples = (0..=dts)
        .map(|i| gamma.evaluate(dense_param(i, dts)))
        .collect::<Result<Vec<_>>>()?;
    let chords: Vec<f64> = samples.windows(2).map(|w| (w[1] - w[0]).norm()).collect();
    let length: f64 = chords.iter().sum();
    if !length.is_finite() || length < TOLERANCE {
        return Err(GeometryError::Degenerate("curve has zero length".into()).into());
    }

    let segments = points - 1;
    let step = length / segments as f64;

    let mut params = Vec::with_capacity(points);
    params.push(0.0);
    let mut travelled = 0.0;
    let mut next = 1;
    for (i, chord) in chords.iter().enumerate() {
        travelled += chord;
        while next < segments && travelled >= next as f64 * step {
            params.push(dense_param(i + 1, dts));
            next += 1;
        }
    }
    params.push(1.0);

    Ok(Breakpoints { params, length })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use std::f64::consts::PI;

    #[test]
    fn uniform_line_splits_evenly() {
        let line = |t: f64| Vector2::new(4.0 * t, 0.0);
        let b = arc_length_breakpoints(&line, 5, 100).unwrap();
        assert!((b.length - 4.0).abs() < 1e-12);
        assert_eq!(b.params.len(), 5);
        for (k, t) in b.params.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let expected = k as f64 / 4.0;
            assert!((t - expected).abs() <= 0.01 + 1e-12, "t={t}, expected={expected}");
        }
    }

    #[test]
    fn non_uniform_speed_follows_arc_length() {
        // Quarter circle traversed with angle pi/2 * t^3: slow start, fast end.
        let arc = |t: f64| {
            let a = PI / 2.0 * t * t * t;
            Vector2::new(a.cos(), a.sin())
        };
        let b = arc_length_breakpoints(&arc, 4, 4096).unwrap();
        assert!((b.length - PI / 2.0).abs() < 1e-5);
        for (k, t) in b.params.iter().enumerate() {
            let angle = PI / 2.0 * t * t * t;
            #[allow(clippy::cast_precision_loss)]
            let expected = PI / 6.0 * k as f64;
            assert!((angle - expected).abs() < 5e-3, "k={k}, angle={angle}");
        }
    }

    #[test]
    fn endpoints_are_fixed() {
        let wave = |t: f64| Vector2::new(t, (10.0 * t).sin());
        let b = arc_length_breakpoints(&wave, 7, 500).unwrap();
        assert_eq!(b.params.first(), Some(&0.0));
        assert_eq!(b.params.last(), Some(&1.0));
        assert_eq!(b.params.len(), 7);
        assert!(b.params.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn zero_length_curve_is_rejected() {
        let point = |_: f64| Vector2::new(1.0, 1.0);
        assert!(arc_length_breakpoints(&point, 3, 10).is_err());
    }

    #[test]
    fn non_finite_curve_is_rejected() {
        let broken = |t: f64| Vector2::new(t, f64::NAN);
        assert!(arc_length_breakpoints(&broken, 3, 10).is_err());
    }
}
