use crate::backend::KeyEventTarget;

/// Subscription of the renderer's key handlers on the host document,
/// scoped to the pointer being over the viewport.
///
/// Enter and leave are idempotent: a second enter does not attach twice
/// and a leave without a matching enter does nothing.
#[derive(Debug, Default)]
pub struct KeyListenerScope {
    attached: bool,
}

impl KeyListenerScope {
    /// A scope with nothing attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the handlers are currently subscribed through this scope.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Attach the handlers unless already attached. Returns whether an
    /// attach happened.
    pub fn enter(&mut self, target: &mut dyn KeyEventTarget) -> bool {
        if self.attached {
            return false;
        }
        target.attach_key_listeners();
        self.attached = true;
        true
    }

    /// Detach the handlers if attached. Returns whether a detach happened.
    pub fn leave(&mut self, target: &mut dyn KeyEventTarget) -> bool {
        if !self.attached {
            return false;
        }
        target.detach_key_listeners();
        self.attached = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingTarget {
        attached: u32,
        detached: u32,
    }

    impl KeyEventTarget for CountingTarget {
        fn attach_key_listeners(&mut self) {
            self.attached += 1;
        }

        fn detach_key_listeners(&mut self) {
            self.detached += 1;
        }
    }

    #[test]
    fn double_enter_attaches_once() {
        let mut scope = KeyListenerScope::new();
        let mut target = CountingTarget::default();
        assert!(scope.enter(&mut target));
        assert!(!scope.enter(&mut target));
        assert_eq!(target.attached, 1);
        assert!(scope.is_attached());
    }

    #[test]
    fn leave_without_enter_is_ignored() {
        let mut scope = KeyListenerScope::new();
        let mut target = CountingTarget::default();
        assert!(!scope.leave(&mut target));
        assert_eq!(target.detached, 0);

        assert!(scope.enter(&mut target));
        assert!(scope.leave(&mut target));
        assert!(!scope.leave(&mut target));
        assert_eq!((target.attached, target.detached), (1, 1));
    }
}
