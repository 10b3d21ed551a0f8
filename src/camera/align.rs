//! Axis snapping: reorient a camera to look straight down a principal axis.
//!
//! The snapped eye keeps its distance to the focal point, and the new
//! view-up is picked from the two axes orthogonal to the look axis using
//! the dominant component of the current view-up. Repeated snaps therefore
//! always leave the camera with an axis-aligned, unit-length up vector.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::pose::Pose;
use crate::error::ViewSyncError;

/// One of the three principal coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Component index of this axis in a 3-vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Positive unit vector along this axis.
    #[must_use]
    pub const fn unit(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }

    /// The two axes orthogonal to this one, in ascending index order.
    #[must_use]
    pub const fn others(self) -> (Self, Self) {
        match self {
            Self::X => (Self::Y, Self::Z),
            Self::Y => (Self::X, Self::Z),
            Self::Z => (Self::X, Self::Y),
        }
    }

    const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }
}

/// Direction along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    /// Toward +infinity.
    Positive,
    /// Toward -infinity.
    Negative,
}

impl Sign {
    /// `1.0` or `-1.0`.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// A requested snap direction: one of ±X, ±Y, ±Z.
///
/// The eye ends up on this side of the focal point, so `+X` puts the camera
/// at `focal + (d, 0, 0)` looking back toward `-X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisRequest {
    /// Principal axis to snap to.
    pub axis: Axis,
    /// Which side of the focal point the eye lands on.
    pub sign: Sign,
}

impl AxisRequest {
    /// All six snap directions: +X, -X, +Y, -Y, +Z, -Z.
    pub const ALL: [Self; 6] = [
        Self::new(Axis::X, Sign::Positive),
        Self::new(Axis::X, Sign::Negative),
        Self::new(Axis::Y, Sign::Positive),
        Self::new(Axis::Y, Sign::Negative),
        Self::new(Axis::Z, Sign::Positive),
        Self::new(Axis::Z, Sign::Negative),
    ];

    /// Build a request from its axis and sign.
    #[must_use]
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// Unit direction vector for this request (e.g. `+X` → `(1, 0, 0)`).
    #[must_use]
    pub fn direction(self) -> DVec3 {
        self.axis.unit() * self.sign.factor()
    }

    /// Reduce an orientation-widget direction to the axis request its
    /// dominant component names.
    ///
    /// Ties resolve toward the lower axis index. A zero or non-finite vector
    /// names no axis and is rejected.
    pub fn from_direction(direction: DVec3) -> Result<Self, ViewSyncError> {
        if !direction.is_finite() || direction == DVec3::ZERO {
            return Err(ViewSyncError::InvalidAxisRequest(format!(
                "direction {direction} has no dominant axis"
            )));
        }
        let abs = direction.abs();
        let mut index = 0;
        for i in 1..3 {
            if abs[i] > abs[index] {
                index = i;
            }
        }
        let sign = if direction[index] > 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        Ok(Self::new(Axis::from_index(index), sign))
    }
}

impl fmt::Display for AxisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Positive => '+',
            Sign::Negative => '-',
        };
        let axis = match self.axis {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        };
        write!(f, "{sign}{axis}")
    }
}

impl FromStr for AxisRequest {
    type Err = ViewSyncError;

    /// Parse `+x`, `-Y`, `z` (sign defaults to positive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (Sign::Positive, &trimmed[1..]),
            Some(b'-') => (Sign::Negative, &trimmed[1..]),
            _ => (Sign::Positive, trimmed),
        };
        let axis = match rest.to_ascii_lowercase().as_str() {
            "x" => Axis::X,
            "y" => Axis::Y,
            "z" => Axis::Z,
            _ => {
                return Err(ViewSyncError::InvalidAxisRequest(format!(
                    "unrecognized axis '{s}'"
                )))
            }
        };
        Ok(Self::new(axis, sign))
    }
}

/// Dominant-component heuristic: between axes `a` and `b`, keep whichever
/// component of `v` has the larger magnitude and return the unit axis
/// vector signed like that component.
///
/// Equal magnitudes pick `b`. A non-positive component yields the negative
/// axis, so the result is a unit axis vector for every input.
#[must_use]
pub fn major_axis(v: DVec3, a: Axis, b: Axis) -> DVec3 {
    let pick = if v[a.index()].abs() > v[b.index()].abs() {
        a
    } else {
        b
    };
    let value = if v[pick.index()] > 0.0 { 1.0 } else { -1.0 };
    pick.unit() * value
}

/// Snap `pose` so it looks straight along `request`'s axis.
///
/// The focal point is kept, the eye moves to
/// `focal + direction * distance`, and the view-up becomes the dominant of
/// the two axes orthogonal to the look axis. Fails with
/// [`ViewSyncError::DegenerateCamera`] when the eye sits on the focal point.
pub fn align_to_axis(
    pose: &Pose,
    request: AxisRequest,
) -> Result<Pose, ViewSyncError> {
    let distance = pose.distance();
    if !distance.is_finite() || distance <= 0.0 {
        return Err(ViewSyncError::DegenerateCamera { distance });
    }

    let (a, b) = request.axis.others();
    Ok(Pose {
        position: pose.focal_point + request.direction() * distance,
        focal_point: pose.focal_point,
        view_up: major_axis(pose.view_up, a, b),
    })
}
