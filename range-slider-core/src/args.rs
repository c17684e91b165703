//! Configuration of a [`RangeSlider`](crate::RangeSlider).

use derive_setters::Setters;

use crate::{
    error::{ArgsError, FormatError},
    format::{LabelFormat, LabelFormatter},
    gesture::Thumb,
    layout::SliderMetrics,
    model::{DEFAULT_MAXIMUM, DEFAULT_MINIMUM},
};

/// Default movement threshold separating a tap from a drag.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Arguments for creating a [`RangeSlider`](crate::RangeSlider).
///
/// # Examples
///
/// ```
/// use range_slider_core::RangeSliderArgs;
///
/// let args = RangeSliderArgs::default()
///     .minimum(0.0)
///     .maximum(50.0)
///     .lower_value(10.0)
///     .step_value(5.0)
///     .text_format("F1");
/// assert!(args.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangeSliderArgs {
    /// Absolute lower bound.
    pub minimum: f32,
    /// Absolute upper bound.
    pub maximum: f32,
    /// Initially selected lower value, `minimum` when unset.
    #[setters(strip_option)]
    pub lower_value: Option<f32>,
    /// Initially selected upper value, `maximum` when unset.
    #[setters(strip_option)]
    pub upper_value: Option<f32>,
    /// Quantization granularity, `0.0` disables stepping.
    pub step_value: f32,
    /// Quantize while dragging instead of only on release.
    pub step_continuous: bool,
    /// Minimum distance kept between both values.
    pub minimum_range: f32,
    /// Hide the lower thumb, turning the widget into a single-value slider.
    pub min_thumb_hidden: bool,
    /// Hide the upper thumb.
    pub max_thumb_hidden: bool,
    /// Hide the label above the lower thumb.
    pub min_thumb_text_hidden: bool,
    /// Hide the label above the upper thumb.
    pub max_thumb_text_hidden: bool,
    /// Reserve a label line above the thumbs.
    pub show_text_above_thumbs: bool,
    /// Fixed-point label format such as `"F0"` or `"F2"`.
    #[setters(into)]
    pub text_format: String,
    /// Custom label formatter, takes precedence over `text_format`.
    #[setters(skip)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub label_formatter: Option<LabelFormatter>,
    /// Emit value notifications for every drag move, not only on release.
    pub notify_while_dragging: bool,
    /// A disabled slider ignores input and is drawn inactive.
    pub enabled: bool,
    /// Highlight the active range even when the full range is selected.
    pub always_active: bool,
    /// Highlight the active range while the thumbs sit at their defaults.
    pub activate_on_default_values: bool,
    /// Movement threshold separating a tap from a drag; `0.0` starts
    /// dragging on press.
    pub touch_slop: f32,
    /// Extra reach of each thumb's hit zone on both sides.
    pub touch_outset: f32,
    /// Keep the grab offset between pointer and thumb centre while dragging.
    pub keep_touch_offset: bool,
    /// Visual measurements.
    pub metrics: SliderMetrics,
}

impl Default for RangeSliderArgs {
    fn default() -> Self {
        Self {
            minimum: DEFAULT_MINIMUM,
            maximum: DEFAULT_MAXIMUM,
            lower_value: None,
            upper_value: None,
            step_value: 0.0,
            step_continuous: false,
            minimum_range: 0.0,
            min_thumb_hidden: false,
            max_thumb_hidden: false,
            min_thumb_text_hidden: false,
            max_thumb_text_hidden: false,
            show_text_above_thumbs: true,
            text_format: "F0".to_owned(),
            label_formatter: None,
            notify_while_dragging: true,
            enabled: true,
            always_active: false,
            activate_on_default_values: false,
            touch_slop: DEFAULT_TOUCH_SLOP,
            touch_outset: 0.0,
            keep_touch_offset: false,
            metrics: SliderMetrics::default(),
        }
    }
}

impl RangeSliderArgs {
    /// Sets a custom label formatter.
    pub fn label_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn((Thumb, f32)) -> String + Send + Sync + 'static,
    {
        self.label_formatter = Some(LabelFormatter::new(formatter));
        self
    }

    /// Sets a custom label formatter using a shared callback.
    pub fn label_formatter_shared(mut self, formatter: impl Into<LabelFormatter>) -> Self {
        self.label_formatter = Some(formatter.into());
        self
    }

    /// Resolves the label format, preferring the custom formatter.
    pub fn label_format(&self) -> Result<LabelFormat, FormatError> {
        match &self.label_formatter {
            Some(formatter) => Ok(LabelFormat::Custom(formatter.clone())),
            None => LabelFormat::parse(&self.text_format),
        }
    }

    /// Checks that the arguments describe a usable slider.
    ///
    /// Inverted bounds and out-of-range initial values are accepted; they
    /// are clamped when the slider is built.
    pub fn validate(&self) -> Result<(), ArgsError> {
        if !self.minimum.is_finite() || !self.maximum.is_finite() {
            return Err(ArgsError::NonFiniteBounds {
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        for (field, value) in [
            ("lower_value", self.lower_value),
            ("upper_value", self.upper_value),
        ] {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(ArgsError::NonFiniteValue { field, value });
            }
        }
        for (field, value) in [
            ("step_value", self.step_value),
            ("minimum_range", self.minimum_range),
            ("touch_slop", self.touch_slop),
            ("touch_outset", self.touch_outset),
        ] {
            if !value.is_finite() {
                return Err(ArgsError::NonFiniteValue { field, value });
            }
            if value < 0.0 {
                return Err(ArgsError::Negative { field, value });
            }
        }
        self.metrics.validate()?;
        self.label_format()?;
        Ok(())
    }
}
