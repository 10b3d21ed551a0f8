//! The viewport component that wires host model properties, renderer
//! notifications, and orientation-marker interaction together.
//!
//! ```text
//! model.camera set ──▶ push_to_camera ──▶ camera, marker, redraw
//! camera modified  ──▶ pull_from_camera ──▶ model.camera
//! marker clicked   ──▶ OrientationController ──▶ camera, marker, redraw
//! model.data set   ──▶ clear actors (unless append) ──▶ importer
//! importer ready   ──▶ debounce ──▶ marker (first time) ──▶ redraw
//! ```
//!
//! A snap reaches the model through the camera's own modified
//! notification, the same path as any other camera change.

mod model;
mod orientation;
mod scene;

use glam::DVec3;
pub use model::ViewModel;
pub use orientation::{OrientationController, RealignPhase};
pub use scene::{ReadyDebounce, SceneArchive};
use serde_json::Value;
use web_time::{Duration, Instant};

use crate::backend::{Backend, OrientationWidget};
use crate::camera::{CameraState, Pose};
use crate::error::ViewSyncError;
use crate::input::{KeyListenerScope, ViewEvent};
use crate::options::ViewOptions;
use crate::sync::{CameraSync, SyncOutcome};

fn as_dyn_widget<W: OrientationWidget>(
    widget: &mut W,
) -> &mut dyn OrientationWidget {
    widget
}

/// A 3D scene viewport bound to a host model.
///
/// Owns the synchronization state; the renderer itself lives behind
/// [`Backend`]. Every handler runs to completion on the UI thread and never
/// blocks.
pub struct PlotView<B: Backend> {
    backend: B,
    model: ViewModel,
    options: ViewOptions,
    sync: CameraSync,
    orientation: OrientationController,
    widget: Option<B::Widget>,
    keys: KeyListenerScope,
    ready: ReadyDebounce,
}

impl<B: Backend> PlotView<B> {
    /// Bind a view to `backend` and import the model's initial scene.
    ///
    /// The renderer's default document-wide key handlers are detached so
    /// they only run while the pointer is over the viewport.
    pub fn new(backend: B, model: ViewModel, options: ViewOptions) -> Self {
        let mut view = Self {
            backend,
            model,
            sync: CameraSync::new(options.sync.clone()),
            orientation: OrientationController::new(),
            widget: None,
            keys: KeyListenerScope::new(),
            ready: ReadyDebounce::new(Duration::from_millis(
                options.scene.ready_debounce_ms,
            )),
            options,
        };
        view.backend.detach_key_listeners();
        if let Err(e) = view.plot() {
            log::error!("initial scene import failed: {e}");
        }
        view
    }

    // ── Accessors ──

    /// The renderer.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The renderer, mutably (for host-driven import completion and the
    /// like).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Current model properties.
    #[must_use]
    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// The camera synchronizer.
    #[must_use]
    pub fn camera_sync(&self) -> &CameraSync {
        &self.sync
    }

    /// Orientation marker, once the first scene finished importing.
    #[must_use]
    pub fn orientation_widget(&self) -> Option<&B::Widget> {
        self.widget.as_ref()
    }

    /// Whether the renderer's key handlers are attached.
    #[must_use]
    pub fn key_listeners_attached(&self) -> bool {
        self.keys.is_attached()
    }

    // ── Model properties ──

    /// Replace the scene payload and re-import it.
    pub fn set_data(&mut self, data: String) -> Result<(), ViewSyncError> {
        self.model.data = data;
        self.plot()
    }

    /// Set whether new data is added to the existing actors.
    pub fn set_append(&mut self, append: bool) {
        self.model.append = append;
    }

    /// Accept an externally supplied camera value and apply it to the
    /// renderer.
    ///
    /// Malformed values are rejected before the model or the camera change.
    /// When the renderer refuses the state part-way through, the model is
    /// re-synchronized from whatever the camera ended up with.
    pub fn set_camera(
        &mut self,
        value: Value,
    ) -> Result<SyncOutcome, ViewSyncError> {
        let state = CameraState::from_value(value).map_err(|e| {
            log::warn!("rejected camera state: {e}");
            e
        })?;
        self.model.camera = Some(state);
        let result = self.push_model_camera();
        if result.is_err() {
            let _ = self.on_camera_modified();
        }
        result
    }

    /// Gate key forwarding. Turning it off while the pointer is inside
    /// detaches immediately.
    pub fn set_enable_keybindings(&mut self, enabled: bool) {
        self.model.enable_keybindings = enabled;
        if !enabled {
            let _ = self.keys.leave(&mut self.backend);
        }
    }

    // ── Renderer and host events ──

    /// Route one host event to its handler.
    pub fn handle(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::CameraModified => {
                let _ = self.on_camera_modified();
            }
            ViewEvent::OrientationChange { direction } => {
                let _ = self.on_orientation_change(direction);
            }
            ViewEvent::PointerEnter => self.on_pointer_enter(),
            ViewEvent::PointerLeave => self.on_pointer_leave(),
            ViewEvent::SceneReady { at } => self.on_scene_ready(at),
            ViewEvent::Tick { at } => {
                let _ = self.tick(at);
            }
        }
    }

    /// The live camera changed: export a fresh snapshot into the model.
    pub fn on_camera_modified(&mut self) -> Option<CameraState> {
        match self
            .sync
            .pull_from_camera(self.backend.camera(), &mut self.model)
        {
            Ok(state) => state,
            Err(e) => {
                log::error!("camera export failed: {e}");
                None
            }
        }
    }

    /// The orientation marker was clicked: snap the camera along the picked
    /// axis.
    ///
    /// The model is not written here. The renderer reports the snap as a
    /// camera modification, which
    /// [`on_camera_modified`](Self::on_camera_modified) exports. Failures are
    /// logged and leave the camera where it was.
    pub fn on_orientation_change(&mut self, direction: DVec3) -> Option<Pose> {
        let widget = self.widget.as_mut().map(as_dyn_widget);
        match self
            .orientation
            .realign(&mut self.backend, widget, direction)
        {
            Ok(pose) => pose,
            Err(ViewSyncError::DegenerateCamera { distance }) => {
                log::debug!(
                    "orientation change ignored: camera is {distance} from \
                     its focal point"
                );
                None
            }
            Err(e) => {
                log::warn!("orientation change ignored: {e}");
                None
            }
        }
    }

    /// Pointer entered the viewport.
    pub fn on_pointer_enter(&mut self) {
        if self.model.enable_keybindings {
            let _ = self.keys.enter(&mut self.backend);
        }
    }

    /// Pointer left the viewport.
    pub fn on_pointer_leave(&mut self) {
        let _ = self.keys.leave(&mut self.backend);
    }

    /// The importer reported ready. The redraw happens on a later
    /// [`tick`](Self::tick) once ready callbacks go quiet.
    pub fn on_scene_ready(&mut self, now: Instant) {
        self.ready.schedule(now);
    }

    /// Flush debounced work. Returns `true` when a finished import was
    /// presented.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.ready.poll(now) {
            return false;
        }
        if self.widget.is_none() {
            let widget = self
                .backend
                .create_orientation_widget(&self.options.orientation_widget);
            self.widget = Some(widget);
        }
        self.backend.render();
        true
    }

    // ── Internals ──

    fn push_model_camera(&mut self) -> Result<SyncOutcome, ViewSyncError> {
        let Some(state) = self.model.camera.as_ref() else {
            return Ok(SyncOutcome::Skipped);
        };
        let widget = self.widget.as_mut().map(as_dyn_widget);
        self.sync.push_to_camera(&mut self.backend, widget, state)
    }

    fn plot(&mut self) -> Result<(), ViewSyncError> {
        if !self.model.append {
            let removed = self.backend.actor_count();
            self.backend.remove_all_actors();
            if removed > 0 {
                log::debug!("removed {removed} actors before import");
            }
        }
        if self.model.data.is_empty() {
            self.backend.render();
            return Ok(());
        }

        let result = SceneArchive::decode(&self.model.data).and_then(|archive| {
            log::info!("importing scene archive ({} bytes)", archive.len());
            self.backend.load(archive)
        });
        if let Err(e) = &result {
            log::error!("scene import failed: {e}");
        }
        result
    }
}
