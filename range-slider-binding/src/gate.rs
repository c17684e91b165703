//! Gesture arbitration against an enclosing swipe container.

use std::sync::Arc;

use parking_lot::Mutex;
use range_slider_core::GestureArbiter;
use tracing::debug;

/// Shared "swipe gesture enabled" switch of an enclosing container, such as
/// a drawer that opens on an edge swipe.
#[derive(Debug, Clone)]
pub struct SwipeGesture {
    enabled: Arc<Mutex<bool>>,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SwipeGesture {
    /// Creates a switch in the given state.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(Mutex::new(enabled)),
        }
    }

    /// Whether the container currently reacts to swipes.
    pub fn is_enabled(&self) -> bool {
        *self.enabled.lock()
    }

    /// Turns swipe handling on or off.
    pub fn set_enabled(&self, enabled: bool) {
        *self.enabled.lock() = enabled;
    }
}

/// [`GestureArbiter`] that switches a [`SwipeGesture`] off for the duration
/// of a thumb drag and restores its previous state afterwards.
#[derive(Debug)]
pub struct SwipeGestureGate {
    gesture: SwipeGesture,
    previous: Option<bool>,
}

impl SwipeGestureGate {
    /// Creates a gate controlling `gesture`.
    pub fn new(gesture: SwipeGesture) -> Self {
        Self {
            gesture,
            previous: None,
        }
    }
}

impl GestureArbiter for SwipeGestureGate {
    fn claim(&mut self) {
        let mut enabled = self.gesture.enabled.lock();
        self.previous = Some(*enabled);
        *enabled = false;
        debug!(previous = self.previous, "swipe gesture suspended for drag");
    }

    fn release(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.gesture.set_enabled(previous);
            debug!(previous, "swipe gesture restored");
        }
    }
}
