//! Plain-data camera snapshots.
//!
//! A [`CameraState`] is what crosses the boundary between the live renderer
//! camera and the host model. It is built from the renderer's raw
//! [`FieldBag`] with engine-internal entries stripped, so it always
//! serializes cleanly.

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::pose::Pose;
use crate::error::ViewSyncError;

/// Raw camera field map as exposed by the renderer, keyed by camelCase
/// field name. May contain engine-internal handles and metadata.
pub type FieldBag = Map<String, Value>;

/// Fields a renderer exposes that must never leave it: object handles,
/// class metadata, and derived vectors that conflict with the pose on
/// write-back.
pub const INTERNAL_FIELDS: [&str; 4] =
    ["classHierarchy", "vtkObject", "vtkCamera", "viewPlaneNormal"];

/// Serializable snapshot of a camera's observable configuration.
///
/// `position`, `focalPoint`, and `viewUp` are required. The projection
/// scalars fall back to renderer defaults. Any other plain-data field the
/// renderer exposes is carried through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    /// Eye position.
    pub position: DVec3,
    /// Look-at target.
    pub focal_point: DVec3,
    /// Up direction.
    pub view_up: DVec3,
    /// Vertical view angle in degrees.
    #[serde(default = "default_view_angle")]
    pub view_angle: f64,
    /// Near/far clipping distances.
    #[serde(default = "default_clipping_range")]
    pub clipping_range: [f64; 2],
    /// Half-height of the viewport in world units under parallel
    /// projection.
    #[serde(default = "default_parallel_scale")]
    pub parallel_scale: f64,
    /// Orthographic instead of perspective projection.
    #[serde(default)]
    pub parallel_projection: bool,
    /// Remaining renderer-exposed fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

const fn default_view_angle() -> f64 {
    30.0
}

const fn default_clipping_range() -> [f64; 2] {
    [0.01, 1000.01]
}

const fn default_parallel_scale() -> f64 {
    1.0
}

impl CameraState {
    /// Snapshot with the given pose and default projection parameters.
    #[must_use]
    pub fn from_pose(pose: &Pose) -> Self {
        Self {
            position: pose.position,
            focal_point: pose.focal_point,
            view_up: pose.view_up,
            view_angle: default_view_angle(),
            clipping_range: default_clipping_range(),
            parallel_scale: default_parallel_scale(),
            parallel_projection: false,
            extra: BTreeMap::new(),
        }
    }

    /// Build a snapshot from a renderer field bag, dropping every key in
    /// `stripped`.
    pub fn from_fields(
        mut fields: FieldBag,
        stripped: &[String],
    ) -> Result<Self, ViewSyncError> {
        for key in stripped {
            let _ = fields.remove(key.as_str());
        }
        Self::from_value(Value::Object(fields))
    }

    /// Parse and validate an externally supplied camera value.
    pub fn from_value(value: Value) -> Result<Self, ViewSyncError> {
        let state: Self = serde_json::from_value(value)?;
        state.validate()?;
        Ok(state)
    }

    /// Reject non-finite vectors and scalars.
    pub fn validate(&self) -> Result<(), ViewSyncError> {
        for (name, v) in [
            ("position", self.position),
            ("focalPoint", self.focal_point),
            ("viewUp", self.view_up),
        ] {
            if !v.is_finite() {
                return Err(ViewSyncError::InvalidCameraState(format!(
                    "{name} is not finite: {v}"
                )));
            }
        }
        let scalars = [
            ("viewAngle", self.view_angle),
            ("clippingRange[0]", self.clipping_range[0]),
            ("clippingRange[1]", self.clipping_range[1]),
            ("parallelScale", self.parallel_scale),
        ];
        if let Some((name, value)) =
            scalars.iter().find(|(_, value)| !value.is_finite())
        {
            return Err(ViewSyncError::InvalidCameraState(format!(
                "{name} is not finite: {value}"
            )));
        }
        Ok(())
    }

    /// Position, focal point, and view-up.
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.focal_point, self.view_up)
    }

    /// Flatten back into a renderer field bag.
    pub fn to_fields(&self) -> Result<FieldBag, ViewSyncError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(ViewSyncError::InvalidCameraState(format!(
                "camera state serialized to non-object {other}"
            ))),
        }
    }
}

/// The default strip list as owned strings.
#[must_use]
pub fn default_stripped_fields() -> Vec<String> {
    INTERNAL_FIELDS.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn renderer_bag() -> FieldBag {
        let value = json!({
            "position": [0.0, 0.0, 10.0],
            "focalPoint": [0.0, 0.0, 0.0],
            "viewUp": [0.0, 1.0, 0.0],
            "viewAngle": 45.0,
            "clippingRange": [0.1, 100.0],
            "parallelScale": 2.5,
            "parallelProjection": false,
            "directionOfProjection": [0.0, 0.0, -1.0],
            "classHierarchy": ["vtkObject", "vtkCamera"],
            "vtkObject": { "handle": 7 },
            "vtkCamera": { "handle": 8 },
            "viewPlaneNormal": [0.0, 0.0, 1.0],
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn internal_fields_are_stripped() {
        let state =
            CameraState::from_fields(renderer_bag(), &default_stripped_fields())
                .unwrap();
        for key in INTERNAL_FIELDS {
            assert!(!state.extra.contains_key(key), "{key} leaked");
        }
        assert_eq!(state.position, DVec3::new(0.0, 0.0, 10.0));
        assert_eq!(state.view_angle, 45.0);
        assert_eq!(state.clipping_range, [0.1, 100.0]);
        assert_eq!(
            state.extra.get("directionOfProjection"),
            Some(&json!([0.0, 0.0, -1.0]))
        );

        let fields = state.to_fields().unwrap();
        for key in INTERNAL_FIELDS {
            assert!(!fields.contains_key(key));
        }
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let state =
            CameraState::from_fields(renderer_bag(), &default_stripped_fields())
                .unwrap();
        let text = serde_json::to_string(&state).unwrap();
        let back: CameraState = serde_json::from_str(&text).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn missing_required_field_is_invalid() {
        let err = CameraState::from_value(json!({
            "position": [0.0, 0.0, 1.0],
            "viewUp": [0.0, 1.0, 0.0],
        }))
        .unwrap_err();
        assert!(matches!(err, ViewSyncError::InvalidCameraState(_)));
    }

    #[test]
    fn non_numeric_field_is_invalid() {
        let err = CameraState::from_value(json!({
            "position": [0.0, "up", 1.0],
            "focalPoint": [0.0, 0.0, 0.0],
            "viewUp": [0.0, 1.0, 0.0],
        }))
        .unwrap_err();
        assert!(matches!(err, ViewSyncError::InvalidCameraState(_)));

        let err = CameraState::from_value(json!({
            "position": [0.0, 0.0, 1.0],
            "focalPoint": [0.0, 0.0, 0.0],
            "viewUp": [0.0, 1.0, 0.0],
            "viewAngle": "wide",
        }))
        .unwrap_err();
        assert!(matches!(err, ViewSyncError::InvalidCameraState(_)));
    }

    #[test]
    fn non_finite_state_fails_validation() {
        let mut state = CameraState::from_pose(&Pose::default());
        assert!(state.validate().is_ok());
        state.parallel_scale = f64::INFINITY;
        assert!(state.validate().is_err());
        state.parallel_scale = 1.0;
        state.view_up = DVec3::new(f64::NAN, 1.0, 0.0);
        assert!(state.validate().is_err());
    }

    #[test]
    fn optional_fields_use_defaults() {
        let state = CameraState::from_value(json!({
            "position": [1.0, 2.0, 3.0],
            "focalPoint": [0.0, 0.0, 0.0],
            "viewUp": [0.0, 0.0, 1.0],
        }))
        .unwrap();
        assert_eq!(state.view_angle, 30.0);
        assert!(!state.parallel_projection);
        assert!(state.extra.is_empty());
    }
}
