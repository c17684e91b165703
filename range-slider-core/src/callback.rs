//! Shared callbacks for listeners and label formatters.
//!
//! Closures are kept behind an `Arc` so the slider and its arguments stay
//! `Clone + Send + Sync`. Two handles are equal only when they share the
//! same closure, which lets [`RangeSliderArgs`](crate::RangeSliderArgs)
//! derive `PartialEq` with a custom formatter inside.

use std::{fmt, sync::Arc};

/// A shared `Fn(T) -> R` compared by identity.
///
/// Slider listeners use `CallbackWith<SliderEvent>`; custom label formatters
/// use `CallbackWith<(Thumb, f32), String>`.
pub struct CallbackWith<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Wraps `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Runs the callback.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackWith(..)")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_formatters_compare_by_identity() {
        let a = CallbackWith::<u32, u32>::new(|v| v + 1);
        let b = a.clone();
        let c = CallbackWith::<u32, u32>::new(|v| v + 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(b.call(1), 2);
    }

    #[test]
    fn test_clones_share_captured_state() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let callback: CallbackWith<()> = CallbackWith::new(move |()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        callback.call(());
        callback.clone().call(());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
