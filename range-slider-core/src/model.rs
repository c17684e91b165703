//! Value model of a dual-thumb slider.
//!
//! [`RangeModel`] keeps both thumbs in normalized space (`0.0..=1.0` of the
//! value span) and converts to domain values on read. Keeping the canonical
//! state normalized lets gesture code work in `[0, 1]` regardless of the
//! configured bounds, while [`RangeModel::set_range_values`] re-derives the
//! normalized positions from the preserved domain values.
//!
//! Value conversion follows a single policy:
//!
//! - with a step value of zero, values are rounded to two decimal digits;
//! - with a positive step value, values are rounded to the nearest multiple
//!   of the step measured from `minimum`.
//!
//! Both results are clamped to `[minimum, maximum]`. A thumb moved without
//! snapping (a free drag while stepping is on) reports two-decimal values
//! until its next snapped mutation.

use tracing::{debug, warn};

/// Lower bound used when none is configured.
pub const DEFAULT_MINIMUM: f32 = 0.0;
/// Upper bound used when none is configured.
pub const DEFAULT_MAXIMUM: f32 = 100.0;

/// Scale used by the unstepped two-decimal rounding.
const VALUE_PRECISION: f32 = 100.0;

/// Converts a screen x coordinate into a normalized track position.
///
/// Returns `0.0` when the track has no positive width (the widget has not
/// been laid out yet) or when `x` is NaN.
///
/// # Examples
///
/// ```
/// use range_slider_core::model::screen_to_normalized;
///
/// assert_eq!(screen_to_normalized(60.0, 10.0, 110.0), 0.5);
/// assert_eq!(screen_to_normalized(500.0, 10.0, 110.0), 1.0);
/// assert_eq!(screen_to_normalized(60.0, 10.0, 10.0), 0.0);
/// ```
pub fn screen_to_normalized(x: f32, track_left: f32, track_right: f32) -> f32 {
    let width = track_right - track_left;
    if !(width > 0.0) || x.is_nan() {
        return 0.0;
    }
    ((x - track_left) / width).clamp(0.0, 1.0)
}

/// Converts a normalized track position into a screen x coordinate.
pub fn normalized_to_screen(normalized: f32, track_left: f32, track_right: f32) -> f32 {
    track_left + normalized * (track_right - track_left)
}

/// Which reported values changed during a model mutation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValueChanges {
    /// The reported lower value changed.
    pub lower: bool,
    /// The reported upper value changed.
    pub upper: bool,
}

impl ValueChanges {
    /// Returns `true` if either value changed.
    pub fn any(self) -> bool {
        self.lower || self.upper
    }
}

fn differs(a: f32, b: f32) -> bool {
    (a - b).abs() > f32::EPSILON
}

/// Bounds, selection and quantization settings of one slider.
///
/// Invariant after every mutation:
/// `minimum <= lower_value() <= upper_value() <= maximum`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeModel {
    minimum: f32,
    maximum: f32,
    normalized_lower: f32,
    normalized_upper: f32,
    step_value: f32,
    step_continuous: bool,
    minimum_range: f32,
    lower_unsnapped: bool,
    upper_unsnapped: bool,
}

impl Default for RangeModel {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM, DEFAULT_MAXIMUM)
    }
}

impl RangeModel {
    /// Creates a model spanning `[minimum, maximum]` with the full range
    /// selected.
    ///
    /// Non-finite bounds fall back to the defaults, inverted bounds collapse
    /// to a zero-width range at `minimum`.
    pub fn new(minimum: f32, maximum: f32) -> Self {
        let mut model = Self {
            minimum: DEFAULT_MINIMUM,
            maximum: DEFAULT_MAXIMUM,
            normalized_lower: 0.0,
            normalized_upper: 1.0,
            step_value: 0.0,
            step_continuous: false,
            minimum_range: 0.0,
            lower_unsnapped: false,
            upper_unsnapped: false,
        };
        if minimum.is_finite() && maximum.is_finite() {
            model.apply_bounds(minimum, maximum);
        } else {
            warn!(minimum, maximum, "ignoring non-finite slider bounds");
        }
        if model.is_degenerate() {
            model.normalized_upper = 0.0;
        }
        model
    }

    fn apply_bounds(&mut self, minimum: f32, maximum: f32) {
        self.minimum = minimum;
        if maximum < minimum {
            warn!(minimum, maximum, "inverted slider bounds, collapsing range");
            self.maximum = minimum;
        } else {
            self.maximum = maximum;
        }
    }

    /// Absolute lower bound.
    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    /// Absolute upper bound.
    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// `maximum - minimum`.
    pub fn span(&self) -> f32 {
        self.maximum - self.minimum
    }

    /// Returns `true` when the range has (nearly) zero width.
    pub fn is_degenerate(&self) -> bool {
        self.span().abs() < f32::EPSILON
    }

    /// Quantization granularity, `0.0` when disabled.
    pub fn step_value(&self) -> f32 {
        self.step_value
    }

    /// Returns `true` when a positive step value is configured.
    pub fn is_stepped(&self) -> bool {
        self.step_value > f32::EPSILON
    }

    /// Whether intermediate drag positions are quantized.
    pub fn step_continuous(&self) -> bool {
        self.step_continuous
    }

    /// Minimum distance kept between the two values.
    pub fn minimum_range(&self) -> f32 {
        self.minimum_range
    }

    /// Normalized position of the lower thumb.
    pub fn normalized_lower(&self) -> f32 {
        self.normalized_lower
    }

    /// Normalized position of the upper thumb.
    pub fn normalized_upper(&self) -> f32 {
        self.normalized_upper
    }

    /// Currently selected lower value.
    ///
    /// A thumb placed without snapping (a free drag) reports its two-decimal
    /// value until it is snapped again. The lower value never reads above
    /// the upper one.
    pub fn lower_value(&self) -> f32 {
        self.reported_value(self.normalized_lower, self.lower_unsnapped)
            .min(self.upper_value())
    }

    /// Currently selected upper value.
    pub fn upper_value(&self) -> f32 {
        self.reported_value(self.normalized_upper, self.upper_unsnapped)
    }

    fn reported_value(&self, normalized: f32, unsnapped: bool) -> f32 {
        if unsnapped {
            self.unstepped_value(normalized)
        } else {
            self.normalized_to_value(normalized)
        }
    }

    fn unstepped_value(&self, normalized: f32) -> f32 {
        let offset = normalized.clamp(0.0, 1.0) * self.span();
        (self.minimum + (offset * VALUE_PRECISION).round() / VALUE_PRECISION)
            .clamp(self.minimum, self.maximum)
    }

    /// Returns `true` while the selection covers the whole range.
    pub fn is_full_range(&self) -> bool {
        self.normalized_lower <= 0.0 && self.normalized_upper >= 1.0
    }

    /// Converts a domain value into a normalized position in `[0, 1]`.
    ///
    /// Returns `0.0` for a degenerate range instead of dividing by zero.
    pub fn value_to_normalized(&self, value: f32) -> f32 {
        if self.is_degenerate() || value.is_nan() {
            return 0.0;
        }
        ((value - self.minimum) / self.span()).clamp(0.0, 1.0)
    }

    /// Converts a normalized position into a domain value, applying the
    /// rounding policy described in the module docs.
    pub fn normalized_to_value(&self, normalized: f32) -> f32 {
        let normalized = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let offset = normalized * self.span();
        let value = if self.is_stepped() {
            self.minimum + (offset / self.step_value).round() * self.step_value
        } else {
            self.minimum + (offset * VALUE_PRECISION).round() / VALUE_PRECISION
        };
        value.clamp(self.minimum, self.maximum)
    }

    fn normalized_gap(&self) -> f32 {
        if self.is_degenerate() || self.minimum_range <= 0.0 {
            return 0.0;
        }
        (self.minimum_range / self.span()).clamp(0.0, 1.0)
    }

    /// Moves `normalized` onto the step grid with `round` (floor or ceil),
    /// so a position limited by the other thumb still reads back as the
    /// value it is drawn at.
    fn snap_to_grid(&self, normalized: f32, round: fn(f32) -> f32) -> f32 {
        if !self.is_stepped() || self.is_degenerate() {
            return normalized;
        }
        let steps = normalized * self.span() / self.step_value;
        // Positions already on the grid stay put despite float noise.
        let steps = if (steps - steps.round()).abs() < 1e-3 {
            steps.round()
        } else {
            round(steps)
        };
        (steps * self.step_value / self.span()).clamp(0.0, 1.0)
    }

    fn snapshot(&self) -> (f32, f32) {
        (self.lower_value(), self.upper_value())
    }

    fn changes_since(&self, before: (f32, f32)) -> ValueChanges {
        let (lower, upper) = self.snapshot();
        ValueChanges {
            lower: differs(before.0, lower),
            upper: differs(before.1, upper),
        }
    }

    /// Moves the lower thumb to a normalized position.
    ///
    /// The position is clamped to `[0, normalized_upper - gap]`; with
    /// `stepped` it is additionally snapped through a value round trip, and
    /// a snap past the clamp falls back to the last step below it.
    /// Returns `true` when the reported lower value changed.
    pub fn set_normalized_lower(&mut self, normalized: f32, stepped: bool) -> bool {
        if normalized.is_nan() {
            warn!("ignoring NaN lower position");
            return false;
        }
        let before = self.lower_value();
        let ceiling = (self.normalized_upper - self.normalized_gap()).max(0.0);
        let mut next = normalized.min(ceiling).clamp(0.0, 1.0);
        if stepped {
            let snapped = self.value_to_normalized(self.normalized_to_value(next));
            next = if snapped > ceiling {
                self.snap_to_grid(ceiling, f32::floor)
            } else {
                snapped
            };
        }
        self.normalized_lower = next;
        self.lower_unsnapped = !stepped && self.is_stepped();
        differs(before, self.lower_value())
    }

    /// Moves the upper thumb to a normalized position.
    ///
    /// Mirror image of [`RangeModel::set_normalized_lower`] with the clamp
    /// `[normalized_lower + gap, 1]`.
    pub fn set_normalized_upper(&mut self, normalized: f32, stepped: bool) -> bool {
        if normalized.is_nan() {
            warn!("ignoring NaN upper position");
            return false;
        }
        let before = self.upper_value();
        let floor = (self.normalized_lower + self.normalized_gap()).min(1.0);
        let mut next = normalized.max(floor).clamp(0.0, 1.0);
        if stepped {
            let snapped = self.value_to_normalized(self.normalized_to_value(next));
            next = if snapped < floor {
                self.snap_to_grid(floor, f32::ceil)
            } else {
                snapped
            };
        }
        self.normalized_upper = next;
        self.upper_unsnapped = !stepped && self.is_stepped();
        differs(before, self.upper_value())
    }

    /// Sets the lower value in domain units. Values outside the bounds or
    /// beyond the upper value are clamped, never rejected.
    pub fn set_lower_value(&mut self, value: f32, stepped: bool) -> bool {
        if value.is_nan() {
            warn!("ignoring NaN lower value");
            return false;
        }
        self.set_normalized_lower(self.value_to_normalized(value), stepped)
    }

    /// Sets the upper value in domain units.
    pub fn set_upper_value(&mut self, value: f32, stepped: bool) -> bool {
        if value.is_nan() {
            warn!("ignoring NaN upper value");
            return false;
        }
        self.set_normalized_upper(self.value_to_normalized(value), stepped)
    }

    /// Changes the absolute bounds while preserving the selected domain
    /// values as far as the new bounds allow.
    ///
    /// A degenerate new range pins both thumbs at normalized `0`.
    pub fn set_range_values(&mut self, minimum: f32, maximum: f32) -> ValueChanges {
        if !minimum.is_finite() || !maximum.is_finite() {
            warn!(minimum, maximum, "ignoring non-finite slider bounds");
            return ValueChanges::default();
        }
        let before = self.snapshot();
        let (lower, upper) = before;
        self.apply_bounds(minimum, maximum);

        if self.is_degenerate() {
            self.normalized_lower = 0.0;
            self.normalized_upper = 0.0;
            self.lower_unsnapped = false;
            self.upper_unsnapped = false;
        } else {
            let upper = self.value_to_normalized(upper);
            let lower = self.value_to_normalized(lower).min(upper);
            self.normalized_lower = lower;
            self.normalized_upper = upper;
            self.set_normalized_upper(upper, true);
            self.set_normalized_lower(lower, true);
        }

        debug!(
            minimum = self.minimum,
            maximum = self.maximum,
            lower = self.lower_value(),
            upper = self.upper_value(),
            "slider range changed"
        );
        self.changes_since(before)
    }

    /// Sets the step value. Zero, negative or non-finite input disables
    /// stepping. Existing values are re-quantized on their next mutation.
    pub fn set_step_value(&mut self, step_value: f32) {
        if step_value.is_finite() && step_value > 0.0 {
            self.step_value = step_value;
        } else {
            if step_value != 0.0 {
                warn!(step_value, "invalid step value, disabling steps");
            }
            self.step_value = 0.0;
        }
    }

    /// Chooses between quantizing during a drag and only on release.
    pub fn set_step_continuous(&mut self, step_continuous: bool) {
        self.step_continuous = step_continuous;
    }

    /// Sets the minimum distance between both values and re-applies it to
    /// the current selection by pushing the upper thumb up first, then the
    /// lower thumb down.
    pub fn set_minimum_range(&mut self, minimum_range: f32) -> ValueChanges {
        self.minimum_range = if minimum_range.is_finite() && minimum_range > 0.0 {
            minimum_range
        } else {
            0.0
        };
        let before = self.snapshot();
        let gap = self.normalized_gap();
        if self.normalized_upper - self.normalized_lower < gap {
            self.normalized_upper = (self.normalized_lower + gap).min(1.0);
            self.normalized_lower = (self.normalized_upper - gap).max(0.0);
        }
        self.changes_since(before)
    }

    /// Selects the full range again.
    pub fn reset_selected_values(&mut self) -> ValueChanges {
        let before = self.snapshot();
        self.normalized_lower = 0.0;
        self.normalized_upper = if self.is_degenerate() { 0.0 } else { 1.0 };
        self.lower_unsnapped = false;
        self.upper_unsnapped = false;
        self.changes_since(before)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    /// Small deterministic generator so invariant tests cover many inputs
    /// without pulling in a randomness crate.
    struct Lcg(u32);

    impl Lcg {
        fn next_f32(&mut self, low: f32, high: f32) -> f32 {
            self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            low + (self.0 >> 8) as f32 / (1u32 << 24) as f32 * (high - low)
        }
    }

    fn assert_invariants(model: &RangeModel) {
        let (lower, upper) = (model.lower_value(), model.upper_value());
        assert!(model.minimum() <= lower, "{lower} below {}", model.minimum());
        assert!(lower <= upper, "{lower} above {upper}");
        assert!(upper <= model.maximum(), "{upper} above {}", model.maximum());
    }

    #[test]
    fn test_unstepped_round_trip_within_two_decimals() {
        let model = RangeModel::new(-50.0, 250.0);
        let mut value = -50.0;
        while value <= 250.0 {
            let back = model.normalized_to_value(model.value_to_normalized(value));
            assert!((back - value).abs() <= 0.01, "{value} came back as {back}");
            value += 0.37;
        }
    }

    #[test]
    fn test_ordering_and_bounds_hold_for_arbitrary_setters() {
        let mut model = RangeModel::new(0.0, 100.0);
        let mut rng = Lcg(7);
        for i in 0..2_000 {
            let value = rng.next_f32(-300.0, 400.0);
            let stepped = i % 3 == 0;
            if i % 2 == 0 {
                model.set_lower_value(value, stepped);
            } else {
                model.set_upper_value(value, stepped);
            }
            if i % 500 == 0 {
                model.set_step_value(rng.next_f32(0.0, 15.0));
            }
            assert_invariants(&model);
        }
    }

    #[rstest]
    #[case(42.0, 40.0)]
    #[case(43.0, 45.0)]
    #[case(97.6, 100.0)]
    #[case(-3.0, 0.0)]
    fn test_step_snapping(#[case] raw: f32, #[case] expected: f32) {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_step_value(5.0);
        model.set_normalized_lower(raw / 100.0, true);
        assert_eq!(model.lower_value(), expected);
    }

    #[test]
    fn test_unstepped_set_keeps_raw_position() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_step_value(10.0);
        model.set_normalized_lower(0.23, false);
        assert!((model.normalized_lower() - 0.23).abs() < 1e-6);
        assert_eq!(model.lower_value(), 23.0);

        model.set_normalized_lower(model.normalized_lower(), true);
        assert_eq!(model.lower_value(), 20.0);
    }

    #[test]
    fn test_degenerate_range_never_divides_by_zero() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_range_values(5.0, 5.0);
        assert!(model.is_degenerate());
        model.set_lower_value(3.0, false);
        model.set_upper_value(9.0, true);
        assert_eq!(model.lower_value(), 5.0);
        assert_eq!(model.upper_value(), 5.0);
        assert_eq!(model.value_to_normalized(7.0), 0.0);
    }

    #[test]
    fn test_range_change_preserves_domain_values() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_lower_value(30.0, false);
        model.set_upper_value(80.0, false);

        let changes = model.set_range_values(0.0, 50.0);
        assert_eq!(model.lower_value(), 30.0);
        assert_eq!(model.upper_value(), 50.0);
        assert_eq!(
            changes,
            ValueChanges {
                lower: false,
                upper: true
            }
        );
    }

    #[test]
    fn test_range_shrink_below_both_values() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_lower_value(30.0, false);
        model.set_upper_value(40.0, false);
        model.set_range_values(0.0, 20.0);
        assert_eq!(model.lower_value(), 20.0);
        assert_eq!(model.upper_value(), 20.0);
    }

    #[test]
    fn test_inverted_bounds_collapse() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_range_values(10.0, 2.0);
        assert_eq!(model.minimum(), 10.0);
        assert_eq!(model.maximum(), 10.0);
        assert_invariants(&model);
    }

    #[test]
    fn test_lower_pins_to_upper_instead_of_swapping() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_upper_value(60.0, false);
        assert!(model.set_lower_value(90.0, false));
        assert_eq!(model.lower_value(), 60.0);
        assert_eq!(model.upper_value(), 60.0);
    }

    #[test]
    fn test_stepping_does_not_cross_other_thumb() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_upper_value(25.0, false);
        model.set_step_value(10.0);
        model.set_normalized_lower(0.25, true);
        assert!(model.normalized_lower() <= model.normalized_upper());
    }

    #[test]
    fn test_minimum_range_keeps_gap() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_minimum_range(10.0);
        model.set_upper_value(50.0, false);
        model.set_lower_value(45.0, false);
        assert_eq!(model.lower_value(), 40.0);
        model.set_upper_value(0.0, false);
        assert_eq!(model.upper_value(), 50.0);
    }

    #[test]
    fn test_minimum_range_holds_on_step_grid() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_minimum_range(10.0);
        model.set_step_value(3.0);
        model.set_upper_value(50.0, true);
        model.set_lower_value(45.0, true);
        model.set_upper_value(45.0, true);

        let (lower, upper) = (model.lower_value(), model.upper_value());
        assert_eq!((lower, upper), (39.0, 51.0));
        assert!(upper - lower >= 10.0, "gap {} too small", upper - lower);
        assert_eq!(model.normalized_to_value(model.normalized_lower()), lower);
        assert_eq!(model.normalized_to_value(model.normalized_upper()), upper);
    }

    #[test]
    fn test_minimum_range_reapplied_on_change() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_lower_value(40.0, false);
        model.set_upper_value(45.0, false);
        let changes = model.set_minimum_range(20.0);
        assert!(changes.upper);
        assert_eq!(model.upper_value(), 60.0);
    }

    #[test]
    fn test_nan_inputs_are_ignored() {
        let mut model = RangeModel::new(0.0, 100.0);
        model.set_lower_value(10.0, false);
        assert!(!model.set_lower_value(f32::NAN, false));
        assert!(!model.set_normalized_upper(f32::NAN, true));
        assert!(!model.set_range_values(f32::NAN, 5.0).any());
        assert_eq!(model.lower_value(), 10.0);
        assert_eq!(model.upper_value(), 100.0);
    }

    #[test]
    fn test_invalid_step_disables_quantization() {
        let mut model = RangeModel::default();
        model.set_step_value(-2.0);
        assert!(!model.is_stepped());
        model.set_step_value(f32::INFINITY);
        assert_eq!(model.step_value(), 0.0);
    }

    #[test]
    fn test_reset_selects_full_range() {
        let mut model = RangeModel::new(10.0, 20.0);
        model.set_lower_value(12.0, false);
        model.set_upper_value(15.0, false);
        let changes = model.reset_selected_values();
        assert!(changes.lower && changes.upper);
        assert!(model.is_full_range());
    }

    #[test]
    fn test_screen_conversions() {
        assert_eq!(normalized_to_screen(0.25, 20.0, 220.0), 70.0);
        assert_eq!(screen_to_normalized(70.0, 20.0, 220.0), 0.25);
        assert_eq!(screen_to_normalized(-10.0, 20.0, 220.0), 0.0);
        assert_eq!(screen_to_normalized(f32::NAN, 20.0, 220.0), 0.0);
        assert_eq!(screen_to_normalized(30.0, 50.0, 40.0), 0.0);
    }
}
