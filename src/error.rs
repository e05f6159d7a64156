use thiserror::Error;

/// Top-level error type for the projection engine.
#[derive(Debug, Error)]
pub enum MinimError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Approximation(#[from] ApproximationError),
}

/// Errors caused by degenerate or ill-posed scene geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("frame basis is singular")]
    SingularBasis,

    #[error("expected {expected} components, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("viewpoint at distance {distance} is not outside sphere of radius {radius}")]
    ViewpointInsideSphere { distance: f64, radius: f64 },
}

/// Errors related to camera configuration and projection.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("focal distance must be positive, got {0}")]
    NonPositiveFocalDistance(f64),

    #[error("image plane must have positive extents, got {width}x{height}")]
    InvalidImagePlane { width: f64, height: f64 },

    #[error("field of view {0} is outside (0, pi)")]
    InvalidFieldOfView(f64),

    #[error("point lies on the camera focal plane")]
    PointOnFocalPlane,
}

/// Errors raised while fitting quadratic Bezier chains.
#[derive(Debug, Error)]
pub enum ApproximationError {
    #[error("at least 2 breakpoints are required, got {0}")]
    TooFewPoints(usize),

    #[error("sampling density {dts} is lower than breakpoint count {points}")]
    SamplingTooSparse { dts: usize, points: usize },

    #[error("tangents at t = {t_start} and t = {t_end} are parallel")]
    ParallelTangents { t_start: f64, t_end: f64 },

    #[error("tangent vanishes at t = {t}")]
    ZeroTangent { t: f64 },

    #[error("segment from t = {t_start} to t = {t_end} closes on itself")]
    ClosedSegment { t_start: f64, t_end: f64 },
}

/// Convenience type alias for results using [`MinimError`].
pub type Result<T> = std::result::Result<T, MinimError>;
