//! Names of the bindable properties.

use std::fmt;

/// A bindable property of [`RangeSliderElement`](crate::RangeSliderElement).
///
/// Bounds are pushed into the control first and the selected values last, so
/// values are clamped and quantized against the new settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SliderProperty {
    /// Absolute lower bound.
    MinimumValue,
    /// Absolute upper bound.
    MaximumValue,
    /// Selected lower value.
    LowerValue,
    /// Selected upper value.
    UpperValue,
    /// Quantization granularity.
    StepValue,
    /// Quantize during drags instead of only on release.
    StepValueContinuously,
    /// Minimum distance between both values.
    MinimumRange,
    /// Lower thumb hidden.
    MinThumbHidden,
    /// Upper thumb hidden.
    MaxThumbHidden,
    /// Label above the lower thumb hidden.
    MinThumbTextHidden,
    /// Label above the upper thumb hidden.
    MaxThumbTextHidden,
    /// Label line shown above the thumbs.
    ShowTextAboveThumbs,
    /// Fixed-point label format.
    TextFormat,
    /// Input enabled.
    IsEnabled,
}

impl SliderProperty {
    /// Every property.
    pub const ALL: [SliderProperty; 14] = [
        SliderProperty::MinimumValue,
        SliderProperty::MaximumValue,
        SliderProperty::LowerValue,
        SliderProperty::UpperValue,
        SliderProperty::StepValue,
        SliderProperty::StepValueContinuously,
        SliderProperty::MinimumRange,
        SliderProperty::MinThumbHidden,
        SliderProperty::MaxThumbHidden,
        SliderProperty::MinThumbTextHidden,
        SliderProperty::MaxThumbTextHidden,
        SliderProperty::ShowTextAboveThumbs,
        SliderProperty::TextFormat,
        SliderProperty::IsEnabled,
    ];

    /// Property name as seen by a declarative binding layer.
    pub fn name(self) -> &'static str {
        match self {
            SliderProperty::MinimumValue => "MinimumValue",
            SliderProperty::MaximumValue => "MaximumValue",
            SliderProperty::LowerValue => "LowerValue",
            SliderProperty::UpperValue => "UpperValue",
            SliderProperty::StepValue => "StepValue",
            SliderProperty::StepValueContinuously => "StepValueContinuously",
            SliderProperty::MinimumRange => "MinimumRange",
            SliderProperty::MinThumbHidden => "MinThumbHidden",
            SliderProperty::MaxThumbHidden => "MaxThumbHidden",
            SliderProperty::MinThumbTextHidden => "MinThumbTextHidden",
            SliderProperty::MaxThumbTextHidden => "MaxThumbTextHidden",
            SliderProperty::ShowTextAboveThumbs => "ShowTextAboveThumbs",
            SliderProperty::TextFormat => "TextFormat",
            SliderProperty::IsEnabled => "IsEnabled",
        }
    }

    /// Looks a property up by its binding name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|property| property.name() == name)
    }
}

impl fmt::Display for SliderProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
