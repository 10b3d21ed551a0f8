use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::sync::ModelSink;

/// Host-visible properties of a plot view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewModel {
    /// Base64-encoded compressed scene archive. Empty means no scene.
    pub data: String,
    /// Keep previously loaded actors when new `data` arrives.
    pub append: bool,
    /// Last camera snapshot exported from, or applied to, the renderer.
    pub camera: Option<CameraState>,
    /// Forward keyboard events to the renderer while the pointer is over
    /// the viewport.
    pub enable_keybindings: bool,
}

impl ModelSink for ViewModel {
    fn publish_camera(&mut self, state: CameraState) {
        self.camera = Some(state);
    }
}
