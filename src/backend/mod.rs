//! Narrow capability interfaces over the external renderer.
//!
//! The renderer, its camera, the orientation marker, the scene importer,
//! and the host document's key handling are all owned elsewhere. This crate
//! only sees them through these traits, so the concrete rendering library
//! can be swapped without touching the synchronization logic.
//! [`headless`] implements every trait in memory.

/// In-memory renderer used by tests and the command-line tool.
pub mod headless;

use crate::camera::{FieldBag, Pose};
use crate::error::ViewSyncError;
use crate::options::OrientationWidgetOptions;
use crate::view::SceneArchive;

/// The renderer-owned camera that actually produces the view.
pub trait LiveCamera {
    /// Every field the camera exposes, engine internals included.
    fn get(&self) -> FieldBag;

    /// Write the given fields through the camera's setters.
    ///
    /// Fields are applied one at a time; an error leaves earlier fields
    /// applied.
    fn set(&mut self, fields: &FieldBag) -> Result<(), ViewSyncError>;

    /// Drop a field that only exists because it was written through
    /// [`set`](Self::set). Returns `false` when the field cannot be removed.
    fn unset(&mut self, key: &str) -> bool;

    /// Current position, focal point, and view-up.
    fn pose(&self) -> Pose;

    /// Move the camera to `pose`.
    fn set_pose(&mut self, pose: &Pose);
}

/// Orientation marker drawn in a viewport corner.
pub trait OrientationWidget {
    /// Re-read the camera and redraw the marker to match it.
    fn update_marker_orientation(&mut self);
}

/// Access to the renderer's active camera and render window.
pub trait RendererHandle {
    /// The active camera.
    fn camera(&self) -> &dyn LiveCamera;

    /// The active camera, mutably.
    fn camera_mut(&mut self) -> &mut dyn LiveCamera;

    /// Ask the render window to redraw. Completion is not awaited.
    fn render(&mut self);
}

/// Scene import and actor bookkeeping.
pub trait SceneImporter {
    /// Number of actors currently in the scene.
    fn actor_count(&self) -> usize;

    /// Remove every actor from the scene.
    fn remove_all_actors(&mut self);

    /// Begin importing `archive`. Import finishes asynchronously; the host
    /// reports completion through
    /// [`PlotView::on_scene_ready`](crate::view::PlotView::on_scene_ready).
    fn load(&mut self, archive: SceneArchive) -> Result<(), ViewSyncError>;
}

/// The renderer's keyboard handlers on the host document.
pub trait KeyEventTarget {
    /// Subscribe the renderer's key handlers.
    fn attach_key_listeners(&mut self);

    /// Unsubscribe the renderer's key handlers.
    fn detach_key_listeners(&mut self);
}

/// Everything a [`PlotView`](crate::view::PlotView) needs from the
/// renderer.
pub trait Backend: RendererHandle + SceneImporter + KeyEventTarget {
    /// Orientation marker handle type.
    type Widget: OrientationWidget;

    /// Create and enable the orientation marker.
    fn create_orientation_widget(
        &mut self,
        options: &OrientationWidgetOptions,
    ) -> Self::Widget;
}
