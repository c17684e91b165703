//! Binds a [`range_slider_core::RangeSlider`] to a bindable element.
//!
//! [`RangeSliderElement`] is the declarative side: a set of observable
//! properties plus the slider events re-raised for application code.
//! [`RangeSliderAdapter`] owns the control and keeps both sides in sync,
//! and [`SwipeGestureGate`] keeps an enclosing swipe container from stealing
//! thumb drags.

#![deny(missing_docs, clippy::unwrap_used)]

pub mod adapter;
pub mod element;
pub mod gate;
pub mod property;

pub use adapter::RangeSliderAdapter;
pub use element::{ChangeOrigin, ElementState, PropertyChange, RangeSliderElement};
pub use gate::{SwipeGesture, SwipeGestureGate};
pub use property::SliderProperty;
pub use range_slider_core::ListenerId;
