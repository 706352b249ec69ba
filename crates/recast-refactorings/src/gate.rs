//! Re-entrancy gate for UI handlers
//!
//! Changing one option control often fires change events on others. Handlers
//! run through the gate so that those nested events are dropped instead of
//! feeding back into each other.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type CommonAction = Box<dyn Fn() + Send + Sync>;

/// A single-holder flag; contended actions are skipped, never queued
#[derive(Default)]
pub struct UiGate {
    locked: AtomicBool,
    common_action: Option<CommonAction>,
}

impl UiGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate that runs `common` before every action passed to [`UiGate::handler`]
    pub fn with_common_action(common: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            locked: AtomicBool::new(false),
            common_action: Some(Box::new(common)),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    /// Take the gate; `false` if someone already holds it
    pub fn lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release the gate; `false` if it was not held
    pub fn unlock(&self) -> bool {
        self.locked
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Take the gate for the lifetime of the returned guard
    pub fn try_guard(&self) -> Option<GateGuard<'_>> {
        self.lock().then_some(GateGuard { gate: self })
    }

    /// Run `action` while holding the gate. Returns `false` without running
    /// it when the gate is taken.
    pub fn run(&self, action: impl FnOnce()) -> bool {
        match self.try_guard() {
            Some(_guard) => {
                action();
                true
            }
            None => false,
        }
    }

    /// Wrap `action` into a callback that runs the common action and then
    /// `action` under the gate. Calls arriving while the gate is held are
    /// dropped and report `false`.
    pub fn handler<F>(self: &Arc<Self>, action: F) -> impl Fn() -> bool + Send + Sync + 'static
    where
        F: Fn() + Send + Sync + 'static,
    {
        let gate = Arc::clone(self);
        move || {
            gate.run(|| {
                if let Some(common) = &gate.common_action {
                    common();
                }
                action();
            })
        }
    }
}

/// Releases the gate when dropped, unwinding included
pub struct GateGuard<'a> {
    gate: &'a UiGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.unlock();
    }
}
