//! Screen-space layout of the slider.
//!
//! [`compute`] is a pure function from a [`LayoutInput`] snapshot to a
//! [`SliderLayout`]: track, active range, thumbs and the optional labels
//! drawn above the thumbs. The host draws from the result and feeds
//! [`SliderLayout::hit_target`] back into gesture resolution.
//!
//! ```text
//!  dist_to_top
//!  [ lower label ]      [ upper label ]
//!  dist_to_thumb
//!        (o)==================(o)
//!  |inset|                        |inset|
//! ```

use tracing::trace;

use crate::{
    error::ArgsError,
    geometry::{Rect, Size},
    gesture::HitTarget,
    model::normalized_to_screen,
};

/// Fixed visual measurements of a slider, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderMetrics {
    /// Size of each thumb.
    pub thumb_size: Size,
    /// Minimum horizontal inset of the track from the widget edges.
    pub internal_padding: f32,
    /// Thickness of the track.
    pub bar_height: f32,
    /// Minimum gap kept between the two labels.
    pub label_spacing: f32,
    /// Gap between the label line and the thumbs.
    pub text_distance_to_thumb: f32,
    /// Gap between the widget top and the label line.
    pub text_distance_to_top: f32,
}

impl Default for SliderMetrics {
    fn default() -> Self {
        Self {
            thumb_size: Size::new(32.0, 32.0),
            internal_padding: 8.0,
            bar_height: 1.0,
            label_spacing: 5.0,
            text_distance_to_thumb: 8.0,
            text_distance_to_top: 8.0,
        }
    }
}

impl SliderMetrics {
    /// Checks that every measurement is finite and non-negative.
    pub fn validate(&self) -> Result<(), ArgsError> {
        let fields = [
            ("thumb_size.width", self.thumb_size.width),
            ("thumb_size.height", self.thumb_size.height),
            ("internal_padding", self.internal_padding),
            ("bar_height", self.bar_height),
            ("label_spacing", self.label_spacing),
            ("text_distance_to_thumb", self.text_distance_to_thumb),
            ("text_distance_to_top", self.text_distance_to_top),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ArgsError::InvalidMetric { field, value });
            }
        }
        Ok(())
    }

    /// Vertical space taken by the label line, or `0.0` without labels.
    pub fn text_offset(&self, show_text_above_thumbs: bool, text_height: f32) -> f32 {
        if show_text_above_thumbs {
            text_height + self.text_distance_to_thumb + self.text_distance_to_top
        } else {
            0.0
        }
    }

    /// Height the widget asks for: thumbs plus the label line when shown.
    pub fn preferred_height(&self, show_text_above_thumbs: bool, text_height: f32) -> f32 {
        self.thumb_size.height + self.text_offset(show_text_above_thumbs, text_height)
    }
}

/// Measures label text. Implemented by the host's text shaping.
pub trait TextMeasure {
    /// Returns the extent of `text` rendered in the label style.
    fn measure(&self, text: &str) -> Size;
}

/// Fixed-advance text measurement, used until the host installs a real one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance of every character.
    pub char_width: f32,
    /// Height of a line.
    pub line_height: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 14.0,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str) -> Size {
        Size::new(text.chars().count() as f32 * self.char_width, self.line_height)
    }
}

/// A formatted label and its measured size.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelText {
    /// Text to draw.
    pub text: String,
    /// Measured extent of `text`.
    pub size: Size,
}

impl LabelText {
    /// Measures `text` with `measure`.
    pub fn measured(text: String, measure: &dyn TextMeasure) -> Self {
        let size = measure.measure(&text);
        Self { text, size }
    }
}

/// When the active-range highlight is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightPolicy {
    /// A disabled slider never highlights.
    pub enabled: bool,
    /// Highlight even when the full range is selected.
    pub always_active: bool,
    /// Highlight while both thumbs sit at their default positions.
    pub activate_on_default_values: bool,
}

impl Default for HighlightPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            always_active: false,
            activate_on_default_values: false,
        }
    }
}

/// Everything the layout depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInput {
    /// Widget bounds.
    pub bounds: Size,
    /// Visual measurements.
    pub metrics: SliderMetrics,
    /// Lower thumb position in `[0, 1]`.
    pub normalized_lower: f32,
    /// Upper thumb position in `[0, 1]`.
    pub normalized_upper: f32,
    /// The lower thumb is neither drawn nor hit-testable.
    pub lower_hidden: bool,
    /// The upper thumb is neither drawn nor hit-testable.
    pub upper_hidden: bool,
    /// Reserve a label line above the thumbs.
    pub show_text_above_thumbs: bool,
    /// Height reserved for the label line.
    pub text_height: f32,
    /// Label width the track is inset for, usually the widest bound label.
    pub inset_label_width: f32,
    /// Label above the lower thumb, `None` when its text is hidden.
    pub lower_label: Option<LabelText>,
    /// Label above the upper thumb, `None` when its text is hidden.
    pub upper_label: Option<LabelText>,
    /// Highlight rules.
    pub highlight: HighlightPolicy,
}

impl Default for LayoutInput {
    fn default() -> Self {
        Self {
            bounds: Size::ZERO,
            metrics: SliderMetrics::default(),
            normalized_lower: 0.0,
            normalized_upper: 1.0,
            lower_hidden: false,
            upper_hidden: false,
            show_text_above_thumbs: false,
            text_height: 0.0,
            inset_label_width: 0.0,
            lower_label: None,
            upper_label: None,
            highlight: HighlightPolicy::default(),
        }
    }
}

/// Where a thumb is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbPlacement {
    /// Horizontal centre, on the track.
    pub center_x: f32,
    /// Drawn rectangle.
    pub rect: Rect,
    /// `false` for a hidden thumb; its position is still meaningful.
    pub visible: bool,
}

/// Where a label is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Drawn rectangle.
    pub rect: Rect,
    /// Label text.
    pub text: String,
}

/// Output of [`compute`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliderLayout {
    /// Widget bounds the layout was computed for.
    pub bounds: Size,
    /// Full track.
    pub track: Rect,
    /// Segment of the track between the thumbs.
    pub active_range: Rect,
    /// Lower thumb.
    pub lower_thumb: ThumbPlacement,
    /// Upper thumb.
    pub upper_thumb: ThumbPlacement,
    /// Label above the lower thumb.
    pub lower_label: Option<LabelPlacement>,
    /// Label above the upper thumb.
    pub upper_label: Option<LabelPlacement>,
    /// Whether the active range is drawn highlighted.
    pub highlight_active: bool,
    /// Height the widget asks its parent for.
    pub preferred_height: f32,
    thumb_half_width: f32,
}

impl SliderLayout {
    /// Left end of the track, the screen x of normalized `0.0`.
    pub fn track_left(&self) -> f32 {
        self.track.left
    }

    /// Right end of the track, the screen x of normalized `1.0`.
    pub fn track_right(&self) -> f32 {
        self.track.right
    }

    /// Hit-testing view of the visible thumbs, with each hit zone widened
    /// by `touch_outset` on both sides.
    pub fn hit_target(&self, touch_outset: f32) -> HitTarget {
        let visible_x = |thumb: &ThumbPlacement| thumb.visible.then_some(thumb.center_x);
        HitTarget {
            lower_x: visible_x(&self.lower_thumb),
            upper_x: visible_x(&self.upper_thumb),
            half_width: self.thumb_half_width + touch_outset.max(0.0),
            widget_width: self.bounds.width,
        }
    }
}

/// Computes the layout for `input`.
pub fn compute(input: &LayoutInput) -> SliderLayout {
    let metrics = &input.metrics;
    let bounds = input.bounds;
    let thumb_half_width = metrics.thumb_size.half_width();

    let inset = metrics
        .internal_padding
        .max(input.inset_label_width * 0.5)
        .max(thumb_half_width);
    let track_left = inset;
    let track_right = (bounds.width - inset).max(track_left);

    let text_offset = metrics.text_offset(input.show_text_above_thumbs, input.text_height);
    let center_y = text_offset + metrics.thumb_size.half_height();
    let half_bar = metrics.bar_height * 0.5;
    let track = Rect::from_edges(
        track_left,
        center_y - half_bar,
        track_right,
        center_y + half_bar,
    );

    let lower_x = normalized_to_screen(input.normalized_lower, track_left, track_right);
    let upper_x = normalized_to_screen(input.normalized_upper, track_left, track_right);
    let active_range = Rect::from_edges(lower_x, track.top, upper_x, track.bottom);

    let thumb = |center_x: f32, hidden: bool| ThumbPlacement {
        center_x,
        rect: Rect::centered(center_x, center_y, metrics.thumb_size),
        visible: !hidden,
    };
    let lower_thumb = thumb(lower_x, input.lower_hidden);
    let upper_thumb = thumb(upper_x, input.upper_hidden);

    let highlight = input.highlight;
    let full_range = input.normalized_lower <= f32::EPSILON
        && input.normalized_upper >= 1.0 - f32::EPSILON;
    let highlight_active = highlight.enabled
        && (highlight.always_active || highlight.activate_on_default_values || !full_range);

    let (lower_label, upper_label) = if input.show_text_above_thumbs && highlight_active {
        place_labels(input, &lower_thumb, &upper_thumb)
    } else {
        (None, None)
    };

    let layout = SliderLayout {
        bounds,
        track,
        active_range,
        lower_thumb,
        upper_thumb,
        lower_label,
        upper_label,
        highlight_active,
        preferred_height: metrics.preferred_height(input.show_text_above_thumbs, input.text_height),
        thumb_half_width,
    };
    trace!(track = ?layout.track, lower_x, upper_x, "slider layout computed");
    layout
}

/// Places both labels, pushing them apart when they would overlap.
///
/// The overlap is split in proportion to the room each thumb has towards
/// its own edge, so a label next to an edge moves less.
fn place_labels(
    input: &LayoutInput,
    lower_thumb: &ThumbPlacement,
    upper_thumb: &ThumbPlacement,
) -> (Option<LabelPlacement>, Option<LabelPlacement>) {
    let metrics = &input.metrics;
    let width = input.bounds.width;
    let top = metrics.text_distance_to_top;

    let lower = input
        .lower_label
        .as_ref()
        .filter(|_| lower_thumb.visible);
    let upper = input
        .upper_label
        .as_ref()
        .filter(|_| upper_thumb.visible);

    let mut lower_left = lower.map(|label| (lower_thumb.center_x - label.size.half_width()).max(0.0));
    let mut upper_left = upper.map(|label| {
        (upper_thumb.center_x - label.size.half_width()).min(width - label.size.width)
    });

    if let (Some(label), Some(lower_pos), Some(upper_pos)) = (lower, lower_left, upper_left) {
        let overlap = lower_pos + label.size.width - upper_pos + metrics.label_spacing;
        if overlap > 0.0 {
            let nl = input.normalized_lower;
            let nu = input.normalized_upper;
            let room = nl + 1.0 - nu;
            let (push_left, push_right) = if room > f32::EPSILON {
                (overlap * nl / room, overlap * (1.0 - nu) / room)
            } else {
                (overlap * 0.5, overlap * 0.5)
            };
            trace!(overlap, push_left, push_right, "separating thumb labels");
            lower_left = Some((lower_pos - push_left).max(0.0));
            upper_left = upper
                .map(|label| (upper_pos + push_right).min((width - label.size.width).max(0.0)));
        }
    }

    let place = |label: Option<&LabelText>, left: Option<f32>| {
        label.zip(left).map(|(label, left)| LabelPlacement {
            rect: Rect::from_origin(left, top, label.size),
            text: label.text.clone(),
        })
    };
    (place(lower, lower_left), place(upper, upper_left))
}
