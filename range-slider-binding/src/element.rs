//! Bindable, platform-neutral description of a range slider.
//!
//! Application code reads and writes [`RangeSliderElement`] properties; the
//! [`RangeSliderAdapter`](crate::RangeSliderAdapter) keeps a control in sync
//! with it. Every property change is announced to observers together with
//! its [`ChangeOrigin`], which is what lets the adapter skip changes it made
//! itself.

use std::sync::Arc;

use parking_lot::RwLock;
use range_slider_core::{
    ListenerId, SliderEvent,
    event::Listeners,
};
use tracing::trace;

use crate::property::SliderProperty;

/// Who changed a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// Application code or a binding.
    Application,
    /// The control, reporting user input or clamping.
    Control,
}

/// A property change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyChange {
    /// Changed property.
    pub property: SliderProperty,
    /// Who changed it.
    pub origin: ChangeOrigin,
}

/// Property values of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    /// Absolute lower bound.
    pub minimum_value: f32,
    /// Absolute upper bound.
    pub maximum_value: f32,
    /// Selected lower value.
    pub lower_value: f32,
    /// Selected upper value.
    pub upper_value: f32,
    /// Quantization granularity.
    pub step_value: f32,
    /// Quantize during drags.
    pub step_value_continuously: bool,
    /// Minimum distance between both values.
    pub minimum_range: f32,
    /// Lower thumb hidden.
    pub min_thumb_hidden: bool,
    /// Upper thumb hidden.
    pub max_thumb_hidden: bool,
    /// Lower label hidden.
    pub min_thumb_text_hidden: bool,
    /// Upper label hidden.
    pub max_thumb_text_hidden: bool,
    /// Label line shown.
    pub show_text_above_thumbs: bool,
    /// Fixed-point label format.
    pub text_format: String,
    /// Input enabled.
    pub is_enabled: bool,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            minimum_value: 0.0,
            maximum_value: 1.0,
            lower_value: 0.0,
            upper_value: 1.0,
            step_value: 0.0,
            step_value_continuously: false,
            minimum_range: 0.0,
            min_thumb_hidden: false,
            max_thumb_hidden: false,
            min_thumb_text_hidden: false,
            max_thumb_text_hidden: false,
            show_text_above_thumbs: false,
            text_format: "F0".to_owned(),
            is_enabled: true,
        }
    }
}

#[derive(Default)]
struct ElementInner {
    state: RwLock<ElementState>,
    observers: RwLock<Listeners<PropertyChange>>,
    handlers: RwLock<Listeners<SliderEvent>>,
}

/// Shared handle to a bindable range slider description.
///
/// Clones share state. Callbacks run after the state lock is released, so
/// they may read or write the element again.
#[derive(Clone, Default)]
pub struct RangeSliderElement {
    inner: Arc<ElementInner>,
}

impl std::fmt::Debug for RangeSliderElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSliderElement")
            .field("state", &*self.inner.state.read())
            .finish_non_exhaustive()
    }
}

macro_rules! element_properties {
    ($($field:ident, $setter:ident: $ty:ty => $property:ident;)*) => {
        impl RangeSliderElement {
            $(
                #[doc = concat!("Current `", stringify!($property), "`.")]
                pub fn $field(&self) -> $ty {
                    self.inner.state.read().$field.clone()
                }

                #[doc = concat!(
                    "Sets `", stringify!($property),
                    "`. Returns `true` and notifies observers if the value changed."
                )]
                pub fn $setter(&self, value: $ty) -> bool {
                    self.set_property(
                        SliderProperty::$property,
                        ChangeOrigin::Application,
                        value,
                        |state| &mut state.$field,
                    )
                }
            )*
        }
    };
}

element_properties! {
    minimum_value, set_minimum_value: f32 => MinimumValue;
    maximum_value, set_maximum_value: f32 => MaximumValue;
    lower_value, set_lower_value: f32 => LowerValue;
    upper_value, set_upper_value: f32 => UpperValue;
    step_value, set_step_value: f32 => StepValue;
    step_value_continuously, set_step_value_continuously: bool => StepValueContinuously;
    minimum_range, set_minimum_range: f32 => MinimumRange;
    min_thumb_hidden, set_min_thumb_hidden: bool => MinThumbHidden;
    max_thumb_hidden, set_max_thumb_hidden: bool => MaxThumbHidden;
    min_thumb_text_hidden, set_min_thumb_text_hidden: bool => MinThumbTextHidden;
    max_thumb_text_hidden, set_max_thumb_text_hidden: bool => MaxThumbTextHidden;
    show_text_above_thumbs, set_show_text_above_thumbs: bool => ShowTextAboveThumbs;
    text_format, set_text_format: String => TextFormat;
    is_enabled, set_is_enabled: bool => IsEnabled;
}

impl RangeSliderElement {
    /// Creates an element with default property values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element with the given property values.
    pub fn with_state(state: ElementState) -> Self {
        let element = Self::default();
        *element.inner.state.write() = state;
        element
    }

    /// Snapshot of every property.
    pub fn state(&self) -> ElementState {
        self.inner.state.read().clone()
    }

    /// Subscribes to property changes.
    pub fn observe<F>(&self, observer: F) -> ListenerId
    where
        F: Fn(PropertyChange) + Send + Sync + 'static,
    {
        self.inner.observers.write().add(observer)
    }

    /// Removes a property observer.
    pub fn unobserve(&self, id: ListenerId) -> bool {
        self.inner.observers.write().remove(id)
    }

    /// Subscribes to the slider events re-raised by the element.
    pub fn add_event_handler<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(SliderEvent) + Send + Sync + 'static,
    {
        self.inner.handlers.write().add(handler)
    }

    /// Removes an event handler.
    pub fn remove_event_handler(&self, id: ListenerId) -> bool {
        self.inner.handlers.write().remove(id)
    }

    /// Records a lower value reported by the control and raises
    /// [`SliderEvent::LowerValueChanged`].
    pub fn on_lower_value_changed(&self, value: f32) {
        self.set_property(
            SliderProperty::LowerValue,
            ChangeOrigin::Control,
            value,
            |state| &mut state.lower_value,
        );
        self.raise(SliderEvent::LowerValueChanged(value));
    }

    /// Records an upper value reported by the control and raises
    /// [`SliderEvent::UpperValueChanged`].
    pub fn on_upper_value_changed(&self, value: f32) {
        self.set_property(
            SliderProperty::UpperValue,
            ChangeOrigin::Control,
            value,
            |state| &mut state.upper_value,
        );
        self.raise(SliderEvent::UpperValueChanged(value));
    }

    /// Raises [`SliderEvent::DragStarted`].
    pub fn on_drag_started(&self) {
        self.raise(SliderEvent::DragStarted);
    }

    /// Raises [`SliderEvent::DragCompleted`].
    pub fn on_drag_completed(&self) {
        self.raise(SliderEvent::DragCompleted);
    }

    fn set_property<T: PartialEq>(
        &self,
        property: SliderProperty,
        origin: ChangeOrigin,
        value: T,
        field: impl FnOnce(&mut ElementState) -> &mut T,
    ) -> bool {
        let changed = {
            let mut state = self.inner.state.write();
            let slot = field(&mut *state);
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        };
        if changed {
            trace!(%property, ?origin, "element property changed");
            let observers = self.inner.observers.read().clone();
            observers.emit(PropertyChange { property, origin });
        }
        changed
    }

    fn raise(&self, event: SliderEvent) {
        let handlers = self.inner.handlers.read().clone();
        handlers.emit(event);
    }
}
