//! Camera data and geometry.
//!
//! Poses, plain-data snapshots of renderer cameras, and the axis-snapping
//! computation driven by the orientation marker.

/// Axis snapping with distance preservation and dominant-axis view-up.
pub mod align;
/// Camera pose (position, focal point, view-up).
pub mod pose;
/// Serializable camera snapshots and renderer field bags.
pub mod state;

pub use align::{align_to_axis, major_axis, Axis, AxisRequest, Sign};
pub use pose::Pose;
pub use state::{CameraState, FieldBag};
