//! Two-way synchronisation between a [`RangeSliderElement`] and a
//! [`RangeSlider`].
//!
//! Element to control: application-originated property changes are queued
//! by an observer and pushed into the control by [`RangeSliderAdapter::flush`],
//! which the platform shell calls from its UI loop.
//!
//! Control to element: slider events are written back immediately with
//! [`ChangeOrigin::Control`], which the queueing observer ignores, so nothing
//! echoes back into the control.

use std::{
    collections::BTreeSet,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;
use range_slider_core::{
    ArgsError, ListenerId, RangeSlider, RangeSliderArgs, SliderEvent, Thumb,
};
use tracing::{debug, warn};

use crate::{
    element::{ChangeOrigin, RangeSliderElement},
    property::SliderProperty,
};

/// Keeps a [`RangeSlider`] and a [`RangeSliderElement`] in sync.
#[derive(Debug)]
pub struct RangeSliderAdapter {
    element: RangeSliderElement,
    slider: RangeSlider,
    pending: Arc<Mutex<BTreeSet<SliderProperty>>>,
    pushing: Arc<AtomicBool>,
    observer: ListenerId,
}

impl RangeSliderAdapter {
    /// Creates a control for `element` and pushes every element property
    /// into it.
    ///
    /// `args` carries the settings that are not bindable properties (touch
    /// handling, metrics, highlight policy); bindable ones are taken from the
    /// element.
    pub fn attach(element: RangeSliderElement, args: RangeSliderArgs) -> Result<Self, ArgsError> {
        let mut slider = RangeSlider::new(args)?;

        let pushing = Arc::new(AtomicBool::new(false));
        let sink = element.clone();
        let suppressed = Arc::clone(&pushing);
        slider.add_listener(move |event| {
            let pushing = suppressed.load(Ordering::Acquire);
            match event {
                SliderEvent::LowerValueChanged(value) if !pushing => {
                    sink.on_lower_value_changed(value)
                }
                SliderEvent::UpperValueChanged(value) if !pushing => {
                    sink.on_upper_value_changed(value)
                }
                SliderEvent::DragStarted => sink.on_drag_started(),
                SliderEvent::DragCompleted => sink.on_drag_completed(),
                // Values changed by a push are reconciled once it finishes.
                SliderEvent::LowerValueChanged(_) | SliderEvent::UpperValueChanged(_) => {}
            }
        });

        let pending = Arc::new(Mutex::new(BTreeSet::new()));
        let queue = Arc::clone(&pending);
        let observer = element.observe(move |change| {
            if change.origin == ChangeOrigin::Application {
                queue.lock().insert(change.property);
            }
        });

        let mut adapter = Self {
            element,
            slider,
            pending,
            pushing,
            observer,
        };
        adapter.update_control();
        Ok(adapter)
    }

    /// The bound element.
    pub fn element(&self) -> &RangeSliderElement {
        &self.element
    }

    /// The control.
    pub fn slider(&self) -> &RangeSlider {
        &self.slider
    }

    /// The control, for forwarding input and installing collaborators.
    pub fn slider_mut(&mut self) -> &mut RangeSlider {
        &mut self.slider
    }

    /// Returns `true` if element changes are waiting for [`Self::flush`].
    pub fn has_pending(&self) -> bool {
        !self.pending.lock().is_empty()
    }

    /// Pushes queued element changes into the control. Returns the number of
    /// properties pushed.
    pub fn flush(&mut self) -> usize {
        let pending = std::mem::take(&mut *self.pending.lock());
        let count = pending.len();
        if count > 0 {
            debug!(count, "pushing element changes into control");
            self.push(pending);
        }
        count
    }

    /// Pushes every element property into the control, discarding the queue.
    pub fn update_control(&mut self) {
        self.pending.lock().clear();
        self.push(SliderProperty::ALL);
    }

    fn push(&mut self, properties: impl IntoIterator<Item = SliderProperty>) {
        let state = self.element.state();
        self.pushing.store(true, Ordering::Release);

        let properties: BTreeSet<SliderProperty> = properties.into_iter().collect();
        let touches = |property: SliderProperty| properties.contains(&property);

        if touches(SliderProperty::MinimumValue) || touches(SliderProperty::MaximumValue) {
            self.slider
                .set_range_values(state.minimum_value, state.maximum_value);
        }
        for property in &properties {
            match property {
                SliderProperty::StepValue => self.slider.set_step_value(state.step_value),
                SliderProperty::StepValueContinuously => self
                    .slider
                    .set_step_continuous(state.step_value_continuously),
                SliderProperty::MinimumRange => self.slider.set_minimum_range(state.minimum_range),
                SliderProperty::MinThumbHidden => self
                    .slider
                    .set_thumb_hidden(Thumb::Lower, state.min_thumb_hidden),
                SliderProperty::MaxThumbHidden => self
                    .slider
                    .set_thumb_hidden(Thumb::Upper, state.max_thumb_hidden),
                SliderProperty::MinThumbTextHidden => self
                    .slider
                    .set_thumb_text_hidden(Thumb::Lower, state.min_thumb_text_hidden),
                SliderProperty::MaxThumbTextHidden => self
                    .slider
                    .set_thumb_text_hidden(Thumb::Upper, state.max_thumb_text_hidden),
                SliderProperty::ShowTextAboveThumbs => self
                    .slider
                    .set_show_text_above_thumbs(state.show_text_above_thumbs),
                SliderProperty::TextFormat => {
                    if let Err(err) = self.slider.set_text_format(&state.text_format) {
                        warn!(%err, "keeping previous label format");
                    }
                }
                SliderProperty::IsEnabled => self.slider.set_enabled(state.is_enabled),
                SliderProperty::MinimumValue
                | SliderProperty::MaximumValue
                | SliderProperty::LowerValue
                | SliderProperty::UpperValue => {}
            }
        }

        let lower = touches(SliderProperty::LowerValue);
        let upper = touches(SliderProperty::UpperValue);
        // Set the value moving away from the other thumb first so the new
        // pair is never pinned by the old one.
        if lower && state.lower_value > self.slider.upper_value() {
            if upper {
                self.slider.set_upper_value(state.upper_value, false);
            }
            self.slider.set_lower_value(state.lower_value, false);
        } else {
            if lower {
                self.slider.set_lower_value(state.lower_value, false);
            }
            if upper {
                self.slider.set_upper_value(state.upper_value, false);
            }
        }

        self.pushing.store(false, Ordering::Release);
        self.reconcile();
    }

    /// Writes control values that differ from the element back to it.
    fn reconcile(&self) {
        let lower = self.slider.lower_value();
        if self.element.lower_value() != lower {
            self.element.on_lower_value_changed(lower);
        }
        let upper = self.slider.upper_value();
        if self.element.upper_value() != upper {
            self.element.on_upper_value_changed(upper);
        }
    }
}

impl Drop for RangeSliderAdapter {
    fn drop(&mut self) {
        self.element.unobserve(self.observer);
    }
}

#[cfg(test)]
mod tests {
    use range_slider_core::{PointerEvent, geometry::Size};

    use super::*;
    use crate::{
        element::ElementState,
        gate::{SwipeGesture, SwipeGestureGate},
    };

    fn element(lower: f32, upper: f32) -> RangeSliderElement {
        RangeSliderElement::with_state(ElementState {
            minimum_value: 0.0,
            maximum_value: 100.0,
            lower_value: lower,
            upper_value: upper,
            ..ElementState::default()
        })
    }

    fn attach(element: &RangeSliderElement) -> RangeSliderAdapter {
        let mut adapter =
            RangeSliderAdapter::attach(element.clone(), RangeSliderArgs::default().touch_slop(0.0))
                .expect("valid args");
        // Track from 16 to 216: x = 16 + 2 * value.
        adapter.slider_mut().set_bounds(Size::new(232.0, 64.0));
        adapter
    }

    #[test]
    fn test_attach_pushes_element_state() {
        let element = element(20.0, 80.0);
        element.set_step_value(5.0);
        let adapter = attach(&element);
        assert_eq!(adapter.slider().minimum(), 0.0);
        assert_eq!(adapter.slider().maximum(), 100.0);
        assert_eq!(adapter.slider().lower_value(), 20.0);
        assert_eq!(adapter.slider().upper_value(), 80.0);
        assert_eq!(adapter.slider().model().step_value(), 5.0);
        assert!(!adapter.has_pending());
    }

    #[test]
    fn test_application_changes_wait_for_flush() {
        let element = element(20.0, 80.0);
        let mut adapter = attach(&element);

        element.set_upper_value(60.0);
        element.set_min_thumb_hidden(true);
        assert_eq!(adapter.slider().upper_value(), 80.0);
        assert!(adapter.has_pending());

        assert_eq!(adapter.flush(), 2);
        assert_eq!(adapter.slider().upper_value(), 60.0);
        assert!(adapter.slider().is_thumb_hidden(Thumb::Lower));
        assert_eq!(adapter.flush(), 0);
    }

    #[test]
    fn test_user_drag_updates_element_without_echo() {
        let element = element(0.0, 100.0);
        let mut adapter = attach(&element);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        element.add_event_handler(move |event| sink.lock().push(event));

        let slider = adapter.slider_mut();
        slider.on_pointer_down(PointerEvent::primary(16.0));
        slider.on_pointer_move(PointerEvent::primary(56.0));
        slider.on_pointer_up(PointerEvent::primary(56.0));

        assert_eq!(element.lower_value(), 20.0);
        assert!(!adapter.has_pending());
        assert_eq!(
            *events.lock(),
            vec![
                SliderEvent::DragStarted,
                SliderEvent::LowerValueChanged(20.0),
                SliderEvent::LowerValueChanged(20.0),
                SliderEvent::DragCompleted,
            ]
        );
    }

    #[test]
    fn test_clamped_push_is_written_back() {
        let element = element(20.0, 80.0);
        let mut adapter = attach(&element);

        element.set_lower_value(150.0);
        adapter.flush();
        assert_eq!(adapter.slider().lower_value(), 80.0);
        assert_eq!(element.lower_value(), 80.0);
        assert!(!adapter.has_pending());
    }

    #[test]
    fn test_push_order_avoids_pinning() {
        let element = element(50.0, 100.0);
        let mut adapter = attach(&element);

        element.set_lower_value(10.0);
        element.set_upper_value(20.0);
        adapter.flush();
        assert_eq!(adapter.slider().lower_value(), 10.0);
        assert_eq!(adapter.slider().upper_value(), 20.0);

        element.set_lower_value(60.0);
        element.set_upper_value(80.0);
        adapter.flush();
        assert_eq!(adapter.slider().lower_value(), 60.0);
        assert_eq!(adapter.slider().upper_value(), 80.0);
    }

    #[test]
    fn test_pressed_thumb_ignores_binding_push() {
        let element = element(0.0, 100.0);
        let mut adapter = attach(&element);
        adapter
            .slider_mut()
            .on_pointer_down(PointerEvent::primary(16.0));

        element.set_lower_value(50.0);
        adapter.flush();
        assert_eq!(adapter.slider().lower_value(), 0.0);
        assert_eq!(element.lower_value(), 0.0);
    }

    #[test]
    fn test_bad_text_format_keeps_previous() {
        let element = element(20.0, 80.0);
        let mut adapter = attach(&element);
        element.set_show_text_above_thumbs(true);
        element.set_text_format("N2".to_owned());
        adapter.flush();
        let layout = adapter.slider().layout();
        assert_eq!(layout.lower_label.expect("lower label").text, "20");
    }

    #[test]
    fn test_drag_suspends_swipe_gesture() {
        let element = element(0.0, 100.0);
        let mut adapter = attach(&element);
        let swipe = SwipeGesture::default();
        let slider = adapter.slider_mut();
        slider.set_gesture_arbiter(Box::new(SwipeGestureGate::new(swipe.clone())));

        slider.on_pointer_down(PointerEvent::primary(16.0));
        assert!(!swipe.is_enabled());
        slider.on_pointer_up(PointerEvent::primary(40.0));
        assert!(swipe.is_enabled());
    }

    #[test]
    fn test_drop_detaches_observer() {
        let element = element(20.0, 80.0);
        let adapter = attach(&element);
        let pending = Arc::clone(&adapter.pending);
        drop(adapter);
        element.set_lower_value(30.0);
        assert!(pending.lock().is_empty());
    }
}
