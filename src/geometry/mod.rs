pub mod curve;
pub mod surface;

pub use curve::{Circle, Ellipse, ParametricCurve, Planar, SharedCurve};
pub use surface::Sphere;
