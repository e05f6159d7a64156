mod fit;
mod resample;

pub use fit::{approximate, Approximate};

use crate::math::VectorN;

/// What to do when two consecutive tangent lines are parallel and have no
/// intersection to use as a control point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParallelTangents {
    /// Fail with [`ParallelTangents`](crate::error::ApproximationError::ParallelTangents).
    #[default]
    Fail,
    /// Use the midpoint of the segment's endpoints, degrading the segment to
    /// a straight line.
    Midpoint,
}

/// Parameters controlling quadratic Bezier approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximationParams {
    /// Number of breakpoints, endpoints included. The chain has
    /// `points - 1` segments.
    pub points: usize,
    /// Number of dense parameter steps used to estimate arc length and
    /// tangents. Must be at least `points`.
    pub dts: usize,
    /// Policy for parallel consecutive tangents.
    pub parallel_tangents: ParallelTangents,
}

impl Default for ApproximationParams {
    fn default() -> Self {
        Self {
            points: 16,
            dts: 1024,
            parallel_tangents: ParallelTangents::Fail,
        }
    }
}

/// One quadratic Bezier segment; its start is the previous segment's end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticSegment<const D: usize> {
    /// The control point.
    pub control: VectorN<D>,
    /// The end point.
    pub end: VectorN<D>,
}

impl<const D: usize> QuadraticSegment<D> {
    /// Evaluates the segment at `s in [0, 1]`, given its start point.
    #[must_use]
    pub fn point_at(&self, start: &VectorN<D>, s: f64) -> VectorN<D> {
        let u = 1.0 - s;
        start * (u * u) + self.control * (2.0 * u * s) + self.end * (s * s)
    }
}

/// A chain of quadratic Bezier segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseQuadratic<const D: usize> {
    start: VectorN<D>,
    segments: Vec<QuadraticSegment<D>>,
}

impl<const D: usize> PiecewiseQuadratic<D> {
    pub(crate) fn new(start: VectorN<D>, segments: Vec<QuadraticSegment<D>>) -> Self {
        Self { start, segments }
    }

    /// Returns the first point of the chain.
    #[must_use]
    pub fn start(&self) -> &VectorN<D> {
        &self.start
    }

    /// Returns the last point of the chain.
    #[must_use]
    pub fn end(&self) -> &VectorN<D> {
        self.segments.last().map_or(&self.start, |s| &s.end)
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[QuadraticSegment<D>] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the start point of segment `index`.
    #[must_use]
    pub fn segment_start(&self, index: usize) -> Option<&VectorN<D>> {
        match index {
            0 => Some(&self.start),
            i => self.segments.get(i - 1).map(|s| &s.end),
        }
    }

    /// Evaluates segment `index` at `s in [0, 1]`.
    #[must_use]
    pub fn evaluate(&self, index: usize, s: f64) -> Option<VectorN<D>> {
        let segment = self.segments.get(index)?;
        let start = self.segment_start(index)?;
        Some(segment.point_at(start, s))
    }

    /// Iterates over `(start, segment)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&VectorN<D>, &QuadraticSegment<D>)> {
        std::iter::once(&self.start)
            .chain(self.segments.iter().map(|s| &s.end))
            .zip(self.segments.iter())
    }
}
