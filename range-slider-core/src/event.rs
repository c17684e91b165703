//! Change notifications emitted by the slider.

use std::fmt;

use tracing::trace;

use crate::callback::CallbackWith;

/// A notification from [`RangeSlider`](crate::RangeSlider).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SliderEvent {
    /// The lower value changed; carries the new domain value.
    LowerValueChanged(f32),
    /// The upper value changed; carries the new domain value.
    UpperValueChanged(f32),
    /// A thumb drag started.
    DragStarted,
    /// A thumb drag finished, either released or cancelled.
    DragCompleted,
}

/// Handle returned by [`Listeners::add`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Ordered set of subscribers to notifications of type `T`.
///
/// Listeners are invoked in subscription order, synchronously, on the thread
/// that delivered the input or setter call. Cloning shares the callbacks, so
/// a registry behind a lock can be cloned out and emitted without holding it.
#[derive(Debug)]
pub struct Listeners<T = SliderEvent> {
    next_id: u64,
    entries: Vec<(ListenerId, CallbackWith<T>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            next_id: self.next_id,
            entries: self.entries.clone(),
        }
    }
}

impl<T> Listeners<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener` and returns its handle.
    pub fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.add_shared(CallbackWith::new(listener))
    }

    /// Subscribes a shared callback and returns its handle.
    pub fn add_shared(&mut self, listener: impl Into<CallbackWith<T>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener.into()));
        id
    }

    /// Unsubscribes a listener. Returns `false` if the handle was unknown.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every listener.
    pub fn emit(&self, event: T)
    where
        T: Clone + fmt::Debug,
    {
        trace!(?event, listeners = self.entries.len(), "emitting notification");
        for (_, listener) in &self.entries {
            listener.call(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_listeners_receive_in_order_and_unsubscribe() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::<SliderEvent>::new();

        let first = Arc::clone(&log);
        let a = listeners.add(move |event| first.lock().expect("log lock").push(("a", event)));
        let second = Arc::clone(&log);
        listeners.add(move |event| second.lock().expect("log lock").push(("b", event)));

        listeners.emit(SliderEvent::DragStarted);
        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        listeners.emit(SliderEvent::LowerValueChanged(4.0));

        assert_eq!(
            *log.lock().expect("log lock"),
            vec![
                ("a", SliderEvent::DragStarted),
                ("b", SliderEvent::DragStarted),
                ("b", SliderEvent::LowerValueChanged(4.0)),
            ]
        );
        assert_eq!(listeners.len(), 1);
    }
}
