use glam::DVec3;
use web_time::Instant;

/// Platform-agnostic host events a [`PlotView`](crate::view::PlotView)
/// reacts to.
///
/// The host translates its own callbacks (renderer "modified"
/// notifications, widget interaction, DOM pointer events, importer ready
/// callbacks, animation-frame ticks) into these and feeds them to
/// [`PlotView::handle`](crate::view::PlotView::handle).
///
/// # Example
///
/// ```ignore
/// view.handle(ViewEvent::OrientationChange { direction: DVec3::X });
/// view.handle(ViewEvent::Tick { at: Instant::now() });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    /// The live camera reported a modification.
    CameraModified,
    /// The orientation marker was clicked.
    OrientationChange {
        /// Axis direction the user picked, e.g. `(1, 0, 0)`.
        direction: DVec3,
    },
    /// Pointer entered the viewport.
    PointerEnter,
    /// Pointer left the viewport.
    PointerLeave,
    /// The scene importer finished (may fire repeatedly).
    SceneReady {
        /// When the callback fired.
        at: Instant,
    },
    /// Periodic host tick used to flush debounced work.
    Tick {
        /// Current time.
        at: Instant,
    },
}
