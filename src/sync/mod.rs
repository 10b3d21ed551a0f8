//! Bidirectional camera synchronization between the live renderer camera
//! and the host model.
//!
//! Both directions share one [`SyncGuard`]. Writing the model's state into
//! the camera makes the camera report a modification, and exporting the
//! camera into the model makes the model report a change; with the guard
//! held, either of those echoes is dropped instead of starting a new pass.

mod guard;

pub use guard::{GuardToken, SyncGuard};

use crate::backend::{LiveCamera, OrientationWidget, RendererHandle};
use crate::camera::{CameraState, FieldBag};
use crate::error::ViewSyncError;
use crate::options::SyncOptions;

/// Receives exported camera snapshots (the host model's `camera`
/// property).
pub trait ModelSink {
    /// Store a fresh snapshot. May synchronously notify listeners.
    fn publish_camera(&mut self, state: CameraState);
}

/// Result of a model → camera pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The state was written to the camera and a redraw was requested.
    Applied,
    /// Another pass held the guard; nothing was touched.
    Skipped,
}

/// Moves camera state between the live camera and the model without
/// feedback loops.
#[derive(Debug, Default)]
pub struct CameraSync {
    guard: SyncGuard,
    options: SyncOptions,
}

impl CameraSync {
    /// Create a synchronizer with the given policy.
    #[must_use]
    pub fn new(options: SyncOptions) -> Self {
        Self {
            guard: SyncGuard::new(),
            options,
        }
    }

    /// The re-entrancy guard shared by both directions.
    #[must_use]
    pub fn guard(&self) -> &SyncGuard {
        &self.guard
    }

    /// Active synchronization policy.
    #[must_use]
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Plain-data snapshot of `camera` with internal fields stripped.
    /// Does not touch the guard.
    pub fn snapshot(
        &self,
        camera: &dyn LiveCamera,
    ) -> Result<CameraState, ViewSyncError> {
        CameraState::from_fields(camera.get(), &self.options.stripped_fields)
    }

    /// Camera → model. Export a fresh snapshot into `sink`.
    ///
    /// Returns `Ok(None)` without reading the camera when another pass is
    /// active, which is the case when the camera reports a modification
    /// caused by [`push_to_camera`](Self::push_to_camera).
    pub fn pull_from_camera(
        &self,
        camera: &dyn LiveCamera,
        sink: &mut dyn ModelSink,
    ) -> Result<Option<CameraState>, ViewSyncError> {
        let Some(_token) = self.guard.try_enter() else {
            log::debug!("camera export skipped: sync pass already active");
            return Ok(None);
        };

        let state = self.snapshot(camera)?;
        sink.publish_camera(state.clone());
        Ok(Some(state))
    }

    /// Model → camera. Write `state` into the renderer's camera, refresh
    /// the orientation marker, and request a redraw.
    ///
    /// Returns [`SyncOutcome::Skipped`] without touching anything when
    /// another pass is active. A state that fails validation is rejected
    /// before any field is written. When the camera rejects a field
    /// part-way through, the camera is restored to its previous fields if
    /// [`SyncOptions::atomic_apply`] is set, the marker and window are
    /// still refreshed, and the error is returned. The guard is released on
    /// every path.
    pub fn push_to_camera(
        &self,
        renderer: &mut dyn RendererHandle,
        widget: Option<&mut dyn OrientationWidget>,
        state: &CameraState,
    ) -> Result<SyncOutcome, ViewSyncError> {
        let Some(_token) = self.guard.try_enter() else {
            log::debug!("camera apply skipped: sync pass already active");
            return Ok(SyncOutcome::Skipped);
        };

        state.validate()?;
        let fields = state.to_fields()?;
        let applied = self.apply(renderer.camera_mut(), &fields);

        if let Some(widget) = widget {
            widget.update_marker_orientation();
        }
        renderer.render();

        applied.map(|()| SyncOutcome::Applied)
    }

    fn apply(
        &self,
        camera: &mut dyn LiveCamera,
        fields: &FieldBag,
    ) -> Result<(), ViewSyncError> {
        let previous = self.options.atomic_apply.then(|| camera.get());
        let Err(err) = camera.set(fields) else {
            return Ok(());
        };

        if let Some(previous) = previous {
            let unrestored = self.restore(camera, fields, &previous);
            if unrestored.is_empty() {
                log::warn!(
                    "camera apply failed ({err}); previous state restored"
                );
            } else {
                log::error!(
                    "camera apply failed ({err}); could not restore \
                     {unrestored:?}"
                );
            }
        } else {
            log::warn!(
                "camera apply failed ({err}); camera left partially applied"
            );
        }
        Err(err)
    }

    /// Undo a partial write of `fields`, one field at a time so a field the
    /// camera refuses cannot block the rest. Keys that never changed are
    /// left alone and keys the write introduced are removed. Returns the
    /// keys that could not be put back.
    fn restore(
        &self,
        camera: &mut dyn LiveCamera,
        fields: &FieldBag,
        previous: &FieldBag,
    ) -> Vec<String> {
        let current = camera.get();
        let mut unrestored = Vec::new();
        for key in fields.keys() {
            if self.options.stripped_fields.contains(key) {
                continue;
            }
            let restored = match (previous.get(key), current.get(key)) {
                (Some(old), Some(now)) if old == now => true,
                (Some(old), _) => {
                    let mut single = FieldBag::new();
                    let _ = single.insert(key.clone(), old.clone());
                    camera.set(&single).is_ok()
                }
                (None, Some(_)) => camera.unset(key),
                (None, None) => true,
            };
            if !restored {
                unrestored.push(key.clone());
            }
        }
        unrestored
    }
}
