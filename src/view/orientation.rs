use std::cell::Cell;

use glam::DVec3;

use crate::backend::{OrientationWidget, RendererHandle};
use crate::camera::{align_to_axis, AxisRequest, Pose};
use crate::error::ViewSyncError;

/// Phase of the orientation-marker interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RealignPhase {
    /// Waiting for an orientation change.
    #[default]
    Idle,
    /// Computing and applying a snapped pose.
    Realigning,
}

/// Drives `Idle → Realigning → Idle` for orientation-marker clicks.
///
/// A request that arrives while a realignment is still running (for
/// example from a callback fired by the redraw) is dropped.
#[derive(Debug, Default)]
pub struct OrientationController {
    phase: Cell<RealignPhase>,
}

/// Puts the controller back to idle when dropped.
struct IdleOnDrop<'a>(&'a Cell<RealignPhase>);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(RealignPhase::Idle);
    }
}

impl OrientationController {
    /// A controller in the idle phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RealignPhase {
        self.phase.get()
    }

    /// Snap the renderer's camera along the axis `direction` names.
    ///
    /// Writes the position and view-up straight to the camera, refreshes
    /// the marker, and requests a redraw (not awaited). Returns the applied
    /// pose, or `Ok(None)` when the request was dropped because another
    /// realignment is running.
    pub fn realign(
        &self,
        renderer: &mut dyn RendererHandle,
        widget: Option<&mut dyn OrientationWidget>,
        direction: DVec3,
    ) -> Result<Option<Pose>, ViewSyncError> {
        if self.phase.get() == RealignPhase::Realigning {
            log::debug!(
                "orientation change {direction} dropped: realignment in flight"
            );
            return Ok(None);
        }
        let request = AxisRequest::from_direction(direction)?;

        self.phase.set(RealignPhase::Realigning);
        let _idle = IdleOnDrop(&self.phase);

        let pose = align_to_axis(&renderer.camera().pose(), request)?;
        renderer.camera_mut().set_pose(&pose);
        log::debug!("camera snapped to {request}");

        if let Some(widget) = widget {
            widget.update_marker_orientation();
        }
        renderer.render();
        Ok(Some(pose))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::backend::headless::{HeadlessBackend, HeadlessCamera};
    use crate::backend::LiveCamera;

    /// Renderer whose redraw delivers another orientation change
    /// synchronously.
    struct ReentrantRenderer {
        inner: HeadlessBackend,
        controller: Rc<OrientationController>,
        nested: Vec<Option<Pose>>,
    }

    impl RendererHandle for ReentrantRenderer {
        fn camera(&self) -> &dyn LiveCamera {
            self.inner.camera()
        }

        fn camera_mut(&mut self) -> &mut dyn LiveCamera {
            self.inner.camera_mut()
        }

        fn render(&mut self) {
            self.inner.render();
            let controller = Rc::clone(&self.controller);
            let nested = controller.realign(self, None, DVec3::Y).unwrap();
            self.nested.push(nested);
        }
    }

    #[test]
    fn snaps_camera_and_returns_to_idle() {
        let controller = OrientationController::new();
        let mut backend = HeadlessBackend::with_camera(HeadlessCamera::new(
            Pose::new(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, DVec3::Y),
        ));

        let pose = controller
            .realign(&mut backend, None, DVec3::X)
            .unwrap()
            .unwrap();
        assert!((pose.position - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-12);
        assert_eq!(pose.view_up, DVec3::Y);
        assert_eq!(backend.camera().pose(), pose);
        assert_eq!(backend.render_count(), 1);
        assert_eq!(controller.phase(), RealignPhase::Idle);
    }

    #[test]
    fn request_during_realignment_is_dropped() {
        let controller = Rc::new(OrientationController::new());
        let mut renderer = ReentrantRenderer {
            inner: HeadlessBackend::with_camera(HeadlessCamera::new(Pose::new(
                DVec3::new(0.0, 0.0, 5.0),
                DVec3::ZERO,
                DVec3::Y,
            ))),
            controller: Rc::clone(&controller),
            nested: Vec::new(),
        };

        let pose = controller
            .realign(&mut renderer, None, -DVec3::Z)
            .unwrap()
            .unwrap();
        assert_eq!(renderer.nested, vec![None]);
        assert_eq!(renderer.camera().pose(), pose);
        assert!((pose.position - DVec3::new(0.0, 0.0, -5.0)).length() < 1e-12);
        assert_eq!(controller.phase(), RealignPhase::Idle);
    }

    #[test]
    fn degenerate_camera_leaves_pose_and_phase_intact() {
        let controller = OrientationController::new();
        let start = Pose::new(DVec3::ONE, DVec3::ONE, DVec3::Y);
        let mut backend =
            HeadlessBackend::with_camera(HeadlessCamera::new(start));

        let err = controller
            .realign(&mut backend, None, DVec3::Z)
            .unwrap_err();
        assert!(matches!(err, ViewSyncError::DegenerateCamera { .. }));
        assert_eq!(backend.camera().pose(), start);
        assert_eq!(backend.render_count(), 0);
        assert_eq!(controller.phase(), RealignPhase::Idle);
    }

    #[test]
    fn zero_direction_is_rejected() {
        let controller = OrientationController::new();
        let mut backend = HeadlessBackend::new();
        let err = controller
            .realign(&mut backend, None, DVec3::ZERO)
            .unwrap_err();
        assert!(matches!(err, ViewSyncError::InvalidAxisRequest(_)));
    }
}
