//! The range slider controller.
//!
//! [`RangeSlider`] is what a platform shell talks to. The shell forwards
//! pointer input and programmatic changes, draws from [`RangeSlider::layout`]
//! and listens for [`SliderEvent`]s.
//!
//! # Notifications
//!
//! Value notifications are emitted only when the reported value changes,
//! with one exception: releasing a thumb always reports its final value,
//! followed by [`SliderEvent::DragCompleted`]. Intermediate drag values are
//! reported only while `notify_while_dragging` is set.

use std::fmt;

use tracing::{debug, trace};

use crate::{
    args::RangeSliderArgs,
    error::{ArgsError, FormatError},
    event::{ListenerId, Listeners, SliderEvent},
    format::LabelFormat,
    geometry::Size,
    gesture::{GestureResolver, GestureStep, HitTarget, PointerEvent, Thumb},
    layout::{
        self, HighlightPolicy, LabelText, LayoutInput, MonospaceMeasure, SliderLayout,
        SliderMetrics, TextMeasure,
    },
    model::{RangeModel, ValueChanges, screen_to_normalized},
};

/// Host collaborator that keeps enclosing containers from stealing a drag.
///
/// `claim` is called when a drag starts, `release` when it completes or is
/// cancelled. Calls always come in pairs.
pub trait GestureArbiter {
    /// A thumb drag started.
    fn claim(&mut self);
    /// The drag ended.
    fn release(&mut self);
}

/// A dual-thumb slider: value model, gesture handling and layout.
pub struct RangeSlider {
    model: RangeModel,
    gesture: GestureResolver,
    listeners: Listeners,
    arbiter: Option<Box<dyn GestureArbiter + Send>>,
    arbiter_claimed: bool,
    measure: Box<dyn TextMeasure + Send + Sync>,
    label_format: LabelFormat,
    metrics: SliderMetrics,
    bounds: Size,
    lower_hidden: bool,
    upper_hidden: bool,
    lower_text_hidden: bool,
    upper_text_hidden: bool,
    show_text_above_thumbs: bool,
    notify_while_dragging: bool,
    touch_outset: f32,
    highlight: HighlightPolicy,
}

impl fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSlider")
            .field("model", &self.model)
            .field("gesture", &self.gesture)
            .field("bounds", &self.bounds)
            .field("enabled", &self.highlight.enabled)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl RangeSlider {
    /// Builds a slider from validated arguments.
    ///
    /// Initial values outside the bounds, or in the wrong order, are
    /// clamped. Widget bounds start at zero until [`RangeSlider::set_bounds`]
    /// is called.
    pub fn new(args: RangeSliderArgs) -> Result<Self, ArgsError> {
        args.validate()?;
        let label_format = args.label_format()?;

        let mut model = RangeModel::new(args.minimum, args.maximum);
        model.set_step_value(args.step_value);
        model.set_step_continuous(args.step_continuous);
        model.set_minimum_range(args.minimum_range);
        if let Some(upper) = args.upper_value {
            model.set_upper_value(upper, true);
        }
        if let Some(lower) = args.lower_value {
            model.set_lower_value(lower, true);
        }

        debug!(
            minimum = model.minimum(),
            maximum = model.maximum(),
            lower = model.lower_value(),
            upper = model.upper_value(),
            "range slider created"
        );

        Ok(Self {
            model,
            gesture: GestureResolver::new(args.touch_slop, args.keep_touch_offset),
            listeners: Listeners::new(),
            arbiter: None,
            arbiter_claimed: false,
            measure: Box::new(MonospaceMeasure::default()),
            label_format,
            metrics: args.metrics,
            bounds: Size::ZERO,
            lower_hidden: args.min_thumb_hidden,
            upper_hidden: args.max_thumb_hidden,
            lower_text_hidden: args.min_thumb_text_hidden,
            upper_text_hidden: args.max_thumb_text_hidden,
            show_text_above_thumbs: args.show_text_above_thumbs,
            notify_while_dragging: args.notify_while_dragging,
            touch_outset: args.touch_outset,
            highlight: HighlightPolicy {
                enabled: args.enabled,
                always_active: args.always_active,
                activate_on_default_values: args.activate_on_default_values,
            },
        })
    }

    /// The value model.
    pub fn model(&self) -> &RangeModel {
        &self.model
    }

    /// Absolute lower bound.
    pub fn minimum(&self) -> f32 {
        self.model.minimum()
    }

    /// Absolute upper bound.
    pub fn maximum(&self) -> f32 {
        self.model.maximum()
    }

    /// Selected lower value.
    pub fn lower_value(&self) -> f32 {
        self.model.lower_value()
    }

    /// Selected upper value.
    pub fn upper_value(&self) -> f32 {
        self.model.upper_value()
    }

    /// Thumb currently owning the pointer.
    pub fn active_thumb(&self) -> Option<Thumb> {
        self.gesture.active_thumb()
    }

    /// Returns `true` while a thumb is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether the slider accepts input.
    pub fn is_enabled(&self) -> bool {
        self.highlight.enabled
    }

    /// Whether `thumb` is hidden.
    pub fn is_thumb_hidden(&self, thumb: Thumb) -> bool {
        match thumb {
            Thumb::Lower => self.lower_hidden,
            Thumb::Upper => self.upper_hidden,
        }
    }

    /// Current widget bounds.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Subscribes to slider events.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(SliderEvent) + Send + Sync + 'static,
    {
        self.listeners.add(listener)
    }

    /// Unsubscribes a listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Installs the collaborator notified when drags start and end.
    ///
    /// A claim held by the previous arbiter is released first.
    pub fn set_gesture_arbiter(&mut self, arbiter: Box<dyn GestureArbiter + Send>) {
        self.release_arbiter();
        self.arbiter = Some(arbiter);
    }

    /// Replaces the label text measurement.
    pub fn set_text_measure(&mut self, measure: impl TextMeasure + Send + Sync + 'static) {
        self.measure = Box::new(measure);
    }

    // Inbound pointer input. Each returns whether the slider claimed the event.

    /// Handles the first pointer going down.
    pub fn on_pointer_down(&mut self, event: PointerEvent) -> bool {
        if !self.highlight.enabled {
            return false;
        }
        let target = self.hit_target();
        let step = self.gesture.pointer_down(event, &target);
        self.apply_step(step)
    }

    /// Handles pointer movement.
    pub fn on_pointer_move(&mut self, event: PointerEvent) -> bool {
        if !self.highlight.enabled {
            return false;
        }
        let step = self.gesture.pointer_move(event);
        self.apply_step(step)
    }

    /// Handles the last pointer lifting.
    pub fn on_pointer_up(&mut self, event: PointerEvent) -> bool {
        if !self.highlight.enabled {
            return false;
        }
        let target = self.hit_target();
        let step = self.gesture.pointer_up(event, &target);
        self.apply_step(step)
    }

    /// Aborts the current gesture.
    pub fn on_pointer_cancel(&mut self) -> bool {
        let step = self.gesture.pointer_cancel();
        self.apply_step(step)
    }

    /// Handles an additional pointer going down during a gesture.
    pub fn on_secondary_pointer_down(&mut self, event: PointerEvent) -> bool {
        if !self.highlight.enabled {
            return false;
        }
        let target = self.hit_target();
        let step = self.gesture.secondary_pointer_down(event, &target);
        self.apply_step(step)
    }

    /// Handles a pointer lifting while `remaining` stays down.
    pub fn on_secondary_pointer_up(
        &mut self,
        lifted: PointerEvent,
        remaining: PointerEvent,
    ) -> bool {
        if !self.highlight.enabled {
            return false;
        }
        let target = self.hit_target();
        let step = self.gesture.secondary_pointer_up(lifted, remaining, &target);
        self.apply_step(step)
    }

    fn hit_target(&self) -> HitTarget {
        self.layout().hit_target(self.touch_outset)
    }

    fn apply_step(&mut self, step: GestureStep) -> bool {
        let stepped = self.model.step_continuous();
        match step {
            GestureStep::Ignored => false,
            GestureStep::Claimed => true,
            GestureStep::DragStarted { thumb, x } => {
                self.begin_drag();
                self.track(thumb, x, stepped, self.notify_while_dragging);
                true
            }
            GestureStep::Moved { thumb, x } => {
                self.track(thumb, x, stepped, self.notify_while_dragging);
                true
            }
            GestureStep::Released { thumb, x, dragged } => {
                if !dragged {
                    self.begin_drag();
                }
                self.track(thumb, x, true, false);
                self.emit_value(thumb);
                self.end_drag();
                true
            }
            GestureStep::Cancelled { thumb, dragged } => {
                if dragged {
                    // Snap a free-dragged thumb so it never rests between steps.
                    if self.snap(thumb) {
                        self.emit_value(thumb);
                    }
                    self.end_drag();
                }
                true
            }
        }
    }

    fn begin_drag(&mut self) {
        self.listeners.emit(SliderEvent::DragStarted);
        if let Some(arbiter) = self.arbiter.as_mut()
            && !self.arbiter_claimed
        {
            arbiter.claim();
            self.arbiter_claimed = true;
        }
    }

    fn end_drag(&mut self) {
        self.release_arbiter();
        self.listeners.emit(SliderEvent::DragCompleted);
    }

    fn release_arbiter(&mut self) {
        if let Some(arbiter) = self.arbiter.as_mut()
            && self.arbiter_claimed
        {
            arbiter.release();
        }
        self.arbiter_claimed = false;
    }

    /// Moves `thumb` to screen x `x`.
    fn track(&mut self, thumb: Thumb, x: f32, stepped: bool, notify: bool) {
        let layout = self.layout();
        let normalized = screen_to_normalized(x, layout.track_left(), layout.track_right());
        let changed = match thumb {
            Thumb::Lower => self.model.set_normalized_lower(normalized, stepped),
            Thumb::Upper => self.model.set_normalized_upper(normalized, stepped),
        };
        trace!(?thumb, x, normalized, changed, "tracking pointer");
        if changed && notify {
            self.emit_value(thumb);
        }
    }

    fn snap(&mut self, thumb: Thumb) -> bool {
        match thumb {
            Thumb::Lower => self
                .model
                .set_normalized_lower(self.model.normalized_lower(), true),
            Thumb::Upper => self
                .model
                .set_normalized_upper(self.model.normalized_upper(), true),
        }
    }

    fn emit_value(&self, thumb: Thumb) {
        let event = match thumb {
            Thumb::Lower => SliderEvent::LowerValueChanged(self.model.lower_value()),
            Thumb::Upper => SliderEvent::UpperValueChanged(self.model.upper_value()),
        };
        self.listeners.emit(event);
    }

    fn emit_changes(&self, changes: ValueChanges) {
        if changes.lower {
            self.emit_value(Thumb::Lower);
        }
        if changes.upper {
            self.emit_value(Thumb::Upper);
        }
    }

    // Programmatic changes.

    /// Changes the bounds, preserving the selected values where possible.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn set_range_values(&mut self, minimum: f32, maximum: f32) {
        let changes = self.model.set_range_values(minimum, maximum);
        self.emit_changes(changes);
    }

    /// Sets the lower value.
    ///
    /// Ignored while the lower thumb is pressed unless `force` is set, so a
    /// binding echo cannot fight the user's finger. Returns whether the
    /// value changed.
    pub fn set_lower_value(&mut self, value: f32, force: bool) -> bool {
        self.set_value(Thumb::Lower, value, force)
    }

    /// Sets the upper value. See [`RangeSlider::set_lower_value`].
    pub fn set_upper_value(&mut self, value: f32, force: bool) -> bool {
        self.set_value(Thumb::Upper, value, force)
    }

    fn set_value(&mut self, thumb: Thumb, value: f32, force: bool) -> bool {
        if !force && self.gesture.active_thumb() == Some(thumb) {
            debug!(?thumb, value, "thumb is pressed, ignoring programmatic value");
            return false;
        }
        let changed = match thumb {
            Thumb::Lower => self.model.set_lower_value(value, true),
            Thumb::Upper => self.model.set_upper_value(value, true),
        };
        if changed {
            self.emit_value(thumb);
        }
        changed
    }

    /// Sets the step value, `0.0` disables stepping.
    pub fn set_step_value(&mut self, step_value: f32) {
        self.model.set_step_value(step_value);
    }

    /// Chooses between quantizing during drags and only on release.
    pub fn set_step_continuous(&mut self, step_continuous: bool) {
        self.model.set_step_continuous(step_continuous);
    }

    /// Sets the minimum distance between both values.
    pub fn set_minimum_range(&mut self, minimum_range: f32) {
        let changes = self.model.set_minimum_range(minimum_range);
        self.emit_changes(changes);
    }

    /// Selects the full range.
    pub fn reset_selected_values(&mut self) {
        let changes = self.model.reset_selected_values();
        self.emit_changes(changes);
    }

    /// Hides or shows a thumb. Hiding the thumb under the pointer cancels
    /// the gesture.
    pub fn set_thumb_hidden(&mut self, thumb: Thumb, hidden: bool) {
        if hidden && self.gesture.active_thumb() == Some(thumb) {
            self.on_pointer_cancel();
        }
        match thumb {
            Thumb::Lower => self.lower_hidden = hidden,
            Thumb::Upper => self.upper_hidden = hidden,
        }
    }

    /// Hides or shows the label above a thumb.
    pub fn set_thumb_text_hidden(&mut self, thumb: Thumb, hidden: bool) {
        match thumb {
            Thumb::Lower => self.lower_text_hidden = hidden,
            Thumb::Upper => self.upper_text_hidden = hidden,
        }
    }

    /// Enables or disables input. Disabling cancels the current gesture.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.on_pointer_cancel();
        }
        self.highlight.enabled = enabled;
    }

    /// Highlights the active range even when the full range is selected.
    pub fn set_always_active(&mut self, always_active: bool) {
        self.highlight.always_active = always_active;
    }

    /// Highlights the active range while the thumbs sit at the bounds.
    pub fn set_activate_on_default_values(&mut self, activate: bool) {
        self.highlight.activate_on_default_values = activate;
    }

    /// Reserves a label line above the thumbs.
    pub fn set_show_text_above_thumbs(&mut self, show: bool) {
        self.show_text_above_thumbs = show;
    }

    /// Reports every drag move instead of only the release.
    pub fn set_notify_while_dragging(&mut self, notify: bool) {
        self.notify_while_dragging = notify;
    }

    /// Movement threshold separating taps from drags.
    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.gesture.set_touch_slop(touch_slop);
    }

    /// Extra reach of each thumb's hit zone.
    pub fn set_touch_outset(&mut self, touch_outset: f32) {
        self.touch_outset = if touch_outset.is_finite() {
            touch_outset.max(0.0)
        } else {
            0.0
        };
    }

    /// Keeps the grab offset during drags.
    pub fn set_keep_touch_offset(&mut self, keep: bool) {
        self.gesture.set_keep_touch_offset(keep);
    }

    /// Parses and installs a fixed-point label format such as `"F1"`.
    pub fn set_text_format(&mut self, format: &str) -> Result<(), FormatError> {
        self.label_format = LabelFormat::parse(format)?;
        Ok(())
    }

    /// Installs a label format.
    pub fn set_label_format(&mut self, format: LabelFormat) {
        self.label_format = format;
    }

    /// Replaces the visual measurements. Invalid metrics are rejected.
    pub fn set_metrics(&mut self, metrics: SliderMetrics) -> Result<(), ArgsError> {
        metrics.validate()?;
        self.metrics = metrics;
        Ok(())
    }

    /// Updates the widget bounds after a host layout pass.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn set_bounds(&mut self, bounds: Size) {
        if bounds.is_finite() {
            self.bounds = Size::new(bounds.width.max(0.0), bounds.height.max(0.0));
        } else {
            debug!("ignoring non-finite bounds");
        }
    }

    /// Height the widget asks its parent for.
    pub fn preferred_height(&self) -> f32 {
        let input = self.layout_input();
        self.metrics
            .preferred_height(input.show_text_above_thumbs, input.text_height)
    }

    /// Computes the current layout.
    pub fn layout(&self) -> SliderLayout {
        layout::compute(&self.layout_input())
    }

    fn layout_input(&self) -> LayoutInput {
        let measure: &dyn TextMeasure = &*self.measure;
        let label = |thumb: Thumb, value: f32| {
            LabelText::measured(self.label_format.format(thumb, value), measure)
        };

        let (text_height, inset_label_width, lower_label, upper_label) =
            if self.show_text_above_thumbs {
                // Inset for the widest bound label so the track does not
                // shift while values change.
                let min_label = label(Thumb::Lower, self.model.minimum()).size;
                let max_label = label(Thumb::Upper, self.model.maximum()).size;
                let lower = (!self.lower_text_hidden)
                    .then(|| label(Thumb::Lower, self.model.lower_value()));
                let upper = (!self.upper_text_hidden)
                    .then(|| label(Thumb::Upper, self.model.upper_value()));
                (
                    min_label.height.max(max_label.height),
                    min_label.width.max(max_label.width),
                    lower,
                    upper,
                )
            } else {
                (0.0, 0.0, None, None)
            };

        LayoutInput {
            bounds: self.bounds,
            metrics: self.metrics,
            normalized_lower: self.model.normalized_lower(),
            normalized_upper: self.model.normalized_upper(),
            lower_hidden: self.lower_hidden,
            upper_hidden: self.upper_hidden,
            show_text_above_thumbs: self.show_text_above_thumbs,
            text_height,
            inset_label_width,
            lower_label,
            upper_label,
            highlight: self.highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    // 232 wide with 32px thumbs gives a track from 16 to 216, so
    // x = 16 + 2 * value on a [0, 100] slider.
    const WIDTH: f32 = 232.0;

    fn x_for(value: f32) -> f32 {
        16.0 + 2.0 * value
    }

    fn slider(args: RangeSliderArgs) -> RangeSlider {
        let mut slider = RangeSlider::new(args).expect("valid args");
        slider.set_bounds(Size::new(WIDTH, 80.0));
        slider
    }

    fn record(slider: &mut RangeSlider) -> Arc<Mutex<Vec<SliderEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        slider.add_listener(move |event| sink.lock().expect("events lock").push(event));
        events
    }

    fn taken(events: &Arc<Mutex<Vec<SliderEvent>>>) -> Vec<SliderEvent> {
        std::mem::take(&mut *events.lock().expect("events lock"))
    }

    struct CountingArbiter {
        claims: Arc<Mutex<(u32, u32)>>,
    }

    impl GestureArbiter for CountingArbiter {
        fn claim(&mut self) {
            self.claims.lock().expect("claims lock").0 += 1;
        }

        fn release(&mut self) {
            self.claims.lock().expect("claims lock").1 += 1;
        }
    }

    #[test]
    fn test_free_drag_reports_raw_values_and_snaps_on_release() {
        let mut slider = slider(
            RangeSliderArgs::default()
                .step_value(10.0)
                .touch_slop(0.0),
        );
        let events = record(&mut slider);

        assert!(slider.on_pointer_down(PointerEvent::primary(x_for(0.0))));
        slider.on_pointer_move(PointerEvent::primary(x_for(23.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(27.0)));
        slider.on_pointer_up(PointerEvent::primary(x_for(27.0)));

        assert_eq!(
            taken(&events),
            vec![
                SliderEvent::DragStarted,
                SliderEvent::LowerValueChanged(23.0),
                SliderEvent::LowerValueChanged(27.0),
                SliderEvent::LowerValueChanged(30.0),
                SliderEvent::DragCompleted,
            ]
        );
        assert_eq!(slider.lower_value(), 30.0);
        assert!(!slider.is_dragging());
    }

    #[test]
    fn test_release_snaps_to_nearest_step() {
        let mut slider = slider(RangeSliderArgs::default().step_value(5.0).touch_slop(0.0));
        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(42.0)));
        slider.on_pointer_up(PointerEvent::primary(x_for(42.0)));
        assert_eq!(slider.lower_value(), 40.0);
    }

    #[test]
    fn test_continuous_steps_quantize_during_drag() {
        let mut slider = slider(
            RangeSliderArgs::default()
                .step_value(10.0)
                .step_continuous(true)
                .touch_slop(0.0),
        );
        let events = record(&mut slider);
        slider.on_pointer_down(PointerEvent::primary(x_for(100.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(77.0)));
        assert_eq!(
            taken(&events),
            vec![
                SliderEvent::DragStarted,
                SliderEvent::UpperValueChanged(80.0)
            ]
        );
    }

    #[test]
    fn test_quiet_drag_reports_only_release() {
        let mut slider = slider(
            RangeSliderArgs::default()
                .notify_while_dragging(false)
                .touch_slop(0.0),
        );
        let events = record(&mut slider);
        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(10.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(20.0)));
        slider.on_pointer_up(PointerEvent::primary(x_for(20.0)));
        assert_eq!(
            taken(&events),
            vec![
                SliderEvent::DragStarted,
                SliderEvent::LowerValueChanged(20.0),
                SliderEvent::DragCompleted,
            ]
        );
    }

    #[test]
    fn test_stacked_thumbs_split_by_touch_side() {
        let args = RangeSliderArgs::default()
            .lower_value(50.0)
            .upper_value(50.0)
            .touch_slop(0.0);

        let mut right = slider(args.clone());
        right.on_pointer_down(PointerEvent::primary(120.0));
        assert_eq!(right.active_thumb(), Some(Thumb::Upper));
        right.on_pointer_move(PointerEvent::primary(x_for(70.0)));
        assert_eq!(right.upper_value(), 70.0);
        assert_eq!(right.lower_value(), 50.0);

        let mut left = slider(args);
        left.on_pointer_down(PointerEvent::primary(110.0));
        assert_eq!(left.active_thumb(), Some(Thumb::Lower));
        left.on_pointer_move(PointerEvent::primary(x_for(20.0)));
        assert_eq!(left.lower_value(), 20.0);
    }

    #[test]
    fn test_dragged_lower_thumb_stops_at_upper() {
        let mut slider = slider(
            RangeSliderArgs::default()
                .upper_value(60.0)
                .touch_slop(0.0),
        );
        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(90.0)));
        assert_eq!(slider.lower_value(), 60.0);
        assert_eq!(slider.upper_value(), 60.0);
    }

    #[test]
    fn test_programmatic_set_is_guarded_while_pressed() {
        let mut slider = slider(RangeSliderArgs::default());
        let events = record(&mut slider);

        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        assert_eq!(slider.active_thumb(), Some(Thumb::Lower));
        assert!(!slider.set_lower_value(30.0, false));
        assert_eq!(slider.lower_value(), 0.0);
        assert!(slider.set_upper_value(80.0, false));
        assert!(slider.set_lower_value(30.0, true));
        assert_eq!(slider.lower_value(), 30.0);
        assert_eq!(
            taken(&events),
            vec![
                SliderEvent::UpperValueChanged(80.0),
                SliderEvent::LowerValueChanged(30.0),
            ]
        );
    }

    #[test]
    fn test_tap_to_seek_moves_nearest_thumb() {
        let mut slider = slider(RangeSliderArgs::default());
        let events = record(&mut slider);

        assert!(!slider.on_pointer_down(PointerEvent::primary(x_for(51.0))));
        assert!(slider.on_pointer_up(PointerEvent::primary(x_for(51.0))));
        assert_eq!(slider.upper_value(), 51.0);
        assert_eq!(
            taken(&events),
            vec![
                SliderEvent::DragStarted,
                SliderEvent::UpperValueChanged(51.0),
                SliderEvent::DragCompleted,
            ]
        );
    }

    #[test]
    fn test_arbiter_claims_for_drag_only() {
        let claims = Arc::new(Mutex::new((0, 0)));
        let mut slider = slider(RangeSliderArgs::default());
        slider.set_gesture_arbiter(Box::new(CountingArbiter {
            claims: Arc::clone(&claims),
        }));

        // Press and cancel inside the slop: no drag, no claim.
        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_cancel();
        assert_eq!(*claims.lock().expect("claims lock"), (0, 0));

        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(30.0)));
        assert_eq!(*claims.lock().expect("claims lock"), (1, 0));
        slider.on_pointer_cancel();
        assert_eq!(*claims.lock().expect("claims lock"), (1, 1));
    }

    #[test]
    fn test_cancel_after_free_drag_snaps_before_completing() {
        let claims = Arc::new(Mutex::new((0, 0)));
        let mut slider = slider(
            RangeSliderArgs::default()
                .step_value(10.0)
                .touch_slop(0.0),
        );
        slider.set_gesture_arbiter(Box::new(CountingArbiter {
            claims: Arc::clone(&claims),
        }));
        let events = record(&mut slider);

        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(23.0)));
        slider.on_pointer_cancel();

        assert_eq!(
            taken(&events),
            vec![
                SliderEvent::DragStarted,
                SliderEvent::LowerValueChanged(23.0),
                SliderEvent::LowerValueChanged(20.0),
                SliderEvent::DragCompleted,
            ]
        );
        assert_eq!(slider.lower_value(), 20.0);
        assert_eq!(*claims.lock().expect("claims lock"), (1, 1));
    }

    #[test]
    fn test_non_finite_release_ends_drag() {
        let claims = Arc::new(Mutex::new((0, 0)));
        let mut slider = slider(RangeSliderArgs::default().touch_slop(0.0));
        slider.set_gesture_arbiter(Box::new(CountingArbiter {
            claims: Arc::clone(&claims),
        }));

        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(30.0)));
        slider.on_pointer_up(PointerEvent::primary(f32::NAN));

        assert!(!slider.is_dragging());
        assert_eq!(slider.active_thumb(), None);
        assert_eq!(slider.lower_value(), 30.0);
        assert_eq!(*claims.lock().expect("claims lock"), (1, 1));
    }

    #[test]
    fn test_thumb_press_after_track_touch_taken_by_parent() {
        let mut slider = slider(RangeSliderArgs::default().touch_slop(0.0));

        // Unclaimed track touch; the parent keeps the rest of that gesture.
        assert!(!slider.on_pointer_down(PointerEvent::primary(x_for(50.0))));

        assert!(slider.on_pointer_down(PointerEvent::primary(x_for(0.0))));
        assert_eq!(slider.active_thumb(), Some(Thumb::Lower));
    }

    #[test]
    fn test_disabled_slider_ignores_input() {
        let mut slider = slider(RangeSliderArgs::default().enabled(false));
        assert!(!slider.on_pointer_down(PointerEvent::primary(x_for(0.0))));
        assert!(!slider.layout().highlight_active);

        slider.set_enabled(true);
        assert!(slider.on_pointer_down(PointerEvent::primary(x_for(0.0))));
        slider.set_enabled(false);
        assert_eq!(slider.active_thumb(), None);
    }

    #[test]
    fn test_hidden_lower_thumb_acts_as_single_slider() {
        let mut slider = slider(RangeSliderArgs::default().min_thumb_hidden(true).touch_slop(0.0));
        slider.set_upper_value(0.0, false);
        // Both thumbs sit at the start; only the upper one can be grabbed.
        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        assert_eq!(slider.active_thumb(), Some(Thumb::Upper));
    }

    #[test]
    fn test_range_change_notifies_changed_values_only() {
        let mut slider = slider(
            RangeSliderArgs::default()
                .lower_value(30.0)
                .upper_value(80.0),
        );
        let events = record(&mut slider);
        slider.set_range_values(0.0, 50.0);
        assert_eq!(taken(&events), vec![SliderEvent::UpperValueChanged(50.0)]);
        assert_eq!(slider.lower_value(), 30.0);
    }

    #[test]
    fn test_degenerate_range_keeps_both_values() {
        let mut slider = slider(RangeSliderArgs::default());
        slider.set_range_values(5.0, 5.0);
        slider.set_lower_value(1.0, false);
        slider.set_upper_value(9.0, false);
        slider.on_pointer_down(PointerEvent::primary(x_for(0.0)));
        slider.on_pointer_move(PointerEvent::primary(x_for(60.0)));
        slider.on_pointer_up(PointerEvent::primary(x_for(60.0)));
        assert_eq!(slider.lower_value(), 5.0);
        assert_eq!(slider.upper_value(), 5.0);
    }

    #[test]
    fn test_initial_values_are_clamped_and_ordered() {
        let slider = slider(
            RangeSliderArgs::default()
                .lower_value(80.0)
                .upper_value(20.0),
        );
        assert_eq!(slider.lower_value(), 20.0);
        assert_eq!(slider.upper_value(), 20.0);

        let slider = self::slider(RangeSliderArgs::default().upper_value(400.0));
        assert_eq!(slider.upper_value(), 100.0);
    }

    #[test]
    fn test_invalid_args_are_rejected() {
        let err = RangeSlider::new(RangeSliderArgs::default().minimum(f32::NAN)).unwrap_err();
        assert!(matches!(err, ArgsError::NonFiniteBounds { .. }));
    }

    #[test]
    fn test_layout_labels_use_text_format() {
        let mut slider = slider(
            RangeSliderArgs::default()
                .lower_value(12.5)
                .upper_value(75.0)
                .text_format("F1"),
        );
        let layout = slider.layout();
        assert_eq!(layout.lower_label.expect("lower label").text, "12.5");
        assert_eq!(layout.upper_label.expect("upper label").text, "75.0");
        assert_eq!(slider.preferred_height(), 32.0 + 14.0 + 16.0);

        slider.set_thumb_text_hidden(Thumb::Upper, true);
        assert!(slider.layout().upper_label.is_none());
    }
}
