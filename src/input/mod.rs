//! Input handling: host event types and the pointer-scoped key listener
//! subscription.

/// Platform-agnostic host events.
pub mod event;
/// Idempotent key-listener attach/detach tied to pointer enter/leave.
pub mod keyboard;

pub use event::ViewEvent;
pub use keyboard::KeyListenerScope;
