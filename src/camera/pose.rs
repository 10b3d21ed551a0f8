use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Camera pose: where the eye sits, what it looks at, and which way is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Eye (camera) position in world space.
    pub position: DVec3,
    /// Look-at target position.
    pub focal_point: DVec3,
    /// Up direction vector.
    pub view_up: DVec3,
}

impl Pose {
    /// Create a pose from its three vectors.
    #[must_use]
    pub const fn new(
        position: DVec3,
        focal_point: DVec3,
        view_up: DVec3,
    ) -> Self {
        Self {
            position,
            focal_point,
            view_up,
        }
    }

    /// Euclidean distance between the eye and the focal point.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.position.distance(self.focal_point)
    }

    /// Unit vector from the focal point toward the eye, or `None` when the
    /// two coincide.
    #[must_use]
    pub fn direction_from_focal_point(&self) -> Option<DVec3> {
        (self.position - self.focal_point).try_normalize()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 1.0),
            focal_point: DVec3::ZERO,
            view_up: DVec3::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let pose = Pose::new(
            DVec3::new(1.0, 2.0, 2.0),
            DVec3::ZERO,
            DVec3::Y,
        );
        assert!((pose.distance() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_eye_has_no_direction() {
        let pose = Pose::new(DVec3::ONE, DVec3::ONE, DVec3::Y);
        assert!(pose.direction_from_focal_point().is_none());
        assert_eq!(pose.distance(), 0.0);
    }
}
