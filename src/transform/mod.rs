mod frame;
mod rotation;

pub use frame::FrameTransform;
pub use rotation::{axis_angle_matrix, rotation_matrix};
