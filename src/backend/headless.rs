//! In-memory renderer.
//!
//! Exposes the same field bag a browser-side renderer camera does
//! (including its internal handles and derived vectors), counts redraws,
//! tracks actors and key-listener subscriptions, and lets callers finish a
//! scene import on demand. Useful for driving a [`PlotView`] without a GPU
//! and for observing exactly what the view asked the renderer to do.
//!
//! [`PlotView`]: crate::view::PlotView

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec3;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::{
    Backend, KeyEventTarget, LiveCamera, OrientationWidget, RendererHandle,
    SceneImporter,
};
use crate::camera::{CameraState, FieldBag, Pose};
use crate::error::ViewSyncError;
use crate::options::OrientationWidgetOptions;
use crate::view::SceneArchive;

/// Keys the camera reports but never accepts on write.
const READ_ONLY_FIELDS: [&str; 5] = [
    "classHierarchy",
    "vtkObject",
    "vtkCamera",
    "viewPlaneNormal",
    "directionOfProjection",
];

/// Camera with a renderer-style field bag and a modification stamp.
#[derive(Debug, Clone)]
pub struct HeadlessCamera {
    pose: Pose,
    view_angle: f64,
    clipping_range: [f64; 2],
    parallel_scale: f64,
    parallel_projection: bool,
    extra: BTreeMap<String, Value>,
    rejected: BTreeSet<String>,
    rejected_writes: u32,
    mtime: u64,
}

impl Default for HeadlessCamera {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

impl HeadlessCamera {
    /// Camera at `pose` with default projection parameters.
    #[must_use]
    pub fn new(pose: Pose) -> Self {
        let defaults = CameraState::from_pose(&pose);
        Self {
            pose,
            view_angle: defaults.view_angle,
            clipping_range: defaults.clipping_range,
            parallel_scale: defaults.parallel_scale,
            parallel_projection: defaults.parallel_projection,
            extra: BTreeMap::new(),
            rejected: BTreeSet::new(),
            rejected_writes: 0,
            mtime: 0,
        }
    }

    /// Camera matching a snapshot exactly.
    #[must_use]
    pub fn from_state(state: &CameraState) -> Self {
        Self {
            view_angle: state.view_angle,
            clipping_range: state.clipping_range,
            parallel_scale: state.parallel_scale,
            parallel_projection: state.parallel_projection,
            extra: state
                .extra
                .iter()
                .filter(|(key, _)| !READ_ONLY_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            ..Self::new(state.pose())
        }
    }

    /// Make every later write of `field` fail, as a renderer rejecting a
    /// value would.
    pub fn reject_field(&mut self, field: &str) {
        let _ = self.rejected.insert(field.to_owned());
    }

    /// Number of writes refused by [`reject_field`](Self::reject_field).
    #[must_use]
    pub fn rejected_writes(&self) -> u32 {
        self.rejected_writes
    }

    /// Modification stamp, bumped on every write.
    #[must_use]
    pub fn mtime(&self) -> u64 {
        self.mtime
    }

    /// Vertical view angle in degrees.
    #[must_use]
    pub fn view_angle(&self) -> f64 {
        self.view_angle
    }

    fn direction_of_projection(&self) -> DVec3 {
        (self.pose.focal_point - self.pose.position)
            .try_normalize()
            .unwrap_or(DVec3::ZERO)
    }

    fn apply_field(
        &mut self,
        key: &str,
        value: &Value,
    ) -> Result<(), ViewSyncError> {
        if self.rejected.contains(key) {
            self.rejected_writes += 1;
            return Err(ViewSyncError::InvalidCameraState(format!(
                "renderer rejected field '{key}'"
            )));
        }
        match key {
            "position" => self.pose.position = parse_field(key, value)?,
            "focalPoint" => self.pose.focal_point = parse_field(key, value)?,
            "viewUp" => self.pose.view_up = parse_field(key, value)?,
            "viewAngle" => self.view_angle = parse_field(key, value)?,
            "clippingRange" => self.clipping_range = parse_field(key, value)?,
            "parallelScale" => self.parallel_scale = parse_field(key, value)?,
            "parallelProjection" => {
                self.parallel_projection = parse_field(key, value)?;
            }
            _ if READ_ONLY_FIELDS.contains(&key) => {}
            _ => {
                let _ = self.extra.insert(key.to_owned(), value.clone());
            }
        }
        Ok(())
    }
}

fn parse_field<T: DeserializeOwned>(
    key: &str,
    value: &Value,
) -> Result<T, ViewSyncError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        ViewSyncError::InvalidCameraState(format!("{key}: {e}"))
    })
}

impl LiveCamera for HeadlessCamera {
    fn get(&self) -> FieldBag {
        let dop = self.direction_of_projection();
        let mut bag = FieldBag::new();
        let entries = [
            ("position", json!(self.pose.position.to_array())),
            ("focalPoint", json!(self.pose.focal_point.to_array())),
            ("viewUp", json!(self.pose.view_up.to_array())),
            ("viewAngle", json!(self.view_angle)),
            ("clippingRange", json!(self.clipping_range)),
            ("parallelScale", json!(self.parallel_scale)),
            ("parallelProjection", json!(self.parallel_projection)),
            ("directionOfProjection", json!(dop.to_array())),
            ("viewPlaneNormal", json!((-dop).to_array())),
            ("classHierarchy", json!(["vtkObject", "vtkCamera"])),
            ("vtkObject", json!({ "mtime": self.mtime })),
            ("vtkCamera", json!({ "mtime": self.mtime })),
        ];
        for (key, value) in entries {
            let _ = bag.insert(key.to_owned(), value);
        }
        for (key, value) in &self.extra {
            let _ = bag.insert(key.clone(), value.clone());
        }
        bag
    }

    fn set(&mut self, fields: &FieldBag) -> Result<(), ViewSyncError> {
        let mut result = Ok(());
        let mut applied = 0_usize;
        for (key, value) in fields {
            if let Err(e) = self.apply_field(key, value) {
                result = Err(e);
                break;
            }
            applied += 1;
        }
        if applied > 0 {
            self.mtime += 1;
        }
        result
    }

    fn unset(&mut self, key: &str) -> bool {
        if self.extra.remove(key).is_none() {
            return false;
        }
        self.mtime += 1;
        true
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: &Pose) {
        self.pose = *pose;
        self.mtime += 1;
    }
}

/// Orientation marker that counts refreshes.
#[derive(Debug, Clone)]
pub struct HeadlessWidget {
    options: OrientationWidgetOptions,
    refreshes: u32,
}

impl HeadlessWidget {
    /// Placement the marker was created with.
    #[must_use]
    pub fn options(&self) -> &OrientationWidgetOptions {
        &self.options
    }

    /// How many times the marker was asked to follow the camera.
    #[must_use]
    pub fn refresh_count(&self) -> u32 {
        self.refreshes
    }
}

impl OrientationWidget for HeadlessWidget {
    fn update_marker_orientation(&mut self) {
        self.refreshes += 1;
    }
}

/// Renderer with one camera, an actor list, and a single pending import
/// slot.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    camera: HeadlessCamera,
    renders: u32,
    actors: Vec<u32>,
    next_actor_id: u32,
    pending: Option<SceneArchive>,
    loads_started: u32,
    key_listeners_attached: bool,
    key_attach_calls: u32,
    widgets_created: u32,
}

impl HeadlessBackend {
    /// Backend around a default camera.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend around the given camera.
    #[must_use]
    pub fn with_camera(camera: HeadlessCamera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    /// The concrete camera.
    #[must_use]
    pub fn headless_camera(&self) -> &HeadlessCamera {
        &self.camera
    }

    /// The concrete camera, mutably.
    pub fn headless_camera_mut(&mut self) -> &mut HeadlessCamera {
        &mut self.camera
    }

    /// Number of redraw requests received.
    #[must_use]
    pub fn render_count(&self) -> u32 {
        self.renders
    }

    /// Ids of the actors currently in the scene.
    #[must_use]
    pub fn actor_ids(&self) -> &[u32] {
        &self.actors
    }

    /// Number of imports started.
    #[must_use]
    pub fn loads_started(&self) -> u32 {
        self.loads_started
    }

    /// Whether an import is waiting for [`complete_load`](Self::complete_load).
    #[must_use]
    pub fn has_pending_load(&self) -> bool {
        self.pending.is_some()
    }

    /// Finish the pending import, adding its actor. Returns `false` when
    /// nothing was pending.
    pub fn complete_load(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.actors.push(self.next_actor_id);
        self.next_actor_id += 1;
        true
    }

    /// Whether the key handlers are currently subscribed.
    #[must_use]
    pub fn key_listeners_attached(&self) -> bool {
        self.key_listeners_attached
    }

    /// Total number of attach calls received.
    #[must_use]
    pub fn key_attach_calls(&self) -> u32 {
        self.key_attach_calls
    }

    /// Number of orientation markers created.
    #[must_use]
    pub fn widgets_created(&self) -> u32 {
        self.widgets_created
    }
}

impl RendererHandle for HeadlessBackend {
    fn camera(&self) -> &dyn LiveCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut dyn LiveCamera {
        &mut self.camera
    }

    fn render(&mut self) {
        self.renders += 1;
    }
}

impl SceneImporter for HeadlessBackend {
    fn actor_count(&self) -> usize {
        self.actors.len()
    }

    fn remove_all_actors(&mut self) {
        self.actors.clear();
    }

    fn load(&mut self, archive: SceneArchive) -> Result<(), ViewSyncError> {
        if !archive.is_zip() {
            return Err(ViewSyncError::SceneLoad(
                "payload is not a zip archive".to_owned(),
            ));
        }
        self.pending = Some(archive);
        self.loads_started += 1;
        Ok(())
    }
}

impl KeyEventTarget for HeadlessBackend {
    fn attach_key_listeners(&mut self) {
        self.key_listeners_attached = true;
        self.key_attach_calls += 1;
    }

    fn detach_key_listeners(&mut self) {
        self.key_listeners_attached = false;
    }
}

impl Backend for HeadlessBackend {
    type Widget = HeadlessWidget;

    fn create_orientation_widget(
        &mut self,
        options: &OrientationWidgetOptions,
    ) -> HeadlessWidget {
        self.widgets_created += 1;
        HeadlessWidget {
            options: options.clone(),
            refreshes: 0,
        }
    }
}
