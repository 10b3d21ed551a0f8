use std::cell::Cell;

/// Single-flag re-entrancy guard for one [`CameraSync`](super::CameraSync).
///
/// This is not a lock. Everything runs on the UI thread; the flag only
/// suppresses a synchronization pass that is started from inside another
/// one (a camera "modified" notification fired by our own write, or a
/// model change fired by our own export).
#[derive(Debug, Default)]
pub struct SyncGuard {
    in_progress: Cell<bool>,
}

impl SyncGuard {
    /// A released guard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            in_progress: Cell::new(false),
        }
    }

    /// Whether a pass currently holds the guard.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.in_progress.get()
    }

    /// Take the guard, or `None` if a pass already holds it.
    ///
    /// The flag is cleared when the returned token drops, on every exit
    /// path including early returns and unwinding.
    #[must_use]
    pub fn try_enter(&self) -> Option<GuardToken<'_>> {
        if self.in_progress.replace(true) {
            return None;
        }
        Some(GuardToken { guard: self })
    }
}

/// Proof that the holder owns the [`SyncGuard`]. Releases it on drop.
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a SyncGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.in_progress.set(false);
    }
}
