//! Toolkit-agnostic core of a dual-thumb range slider.
//!
//! The crate owns everything a range slider does that is not drawing or
//! platform event plumbing:
//!
//! - [`model`]: bounds, selected values, step quantization and the
//!   value/normalized/screen conversions;
//! - [`gesture`]: deciding which thumb a pointer grabs, touch slop,
//!   tap-to-seek and multi-pointer handoff;
//! - [`layout`]: track, active range, thumbs and labels in screen space,
//!   including pushing overlapping labels apart;
//! - [`RangeSlider`]: the controller a platform shell talks to.
//!
//! # Usage
//!
//! ```
//! use range_slider_core::{
//!     PointerEvent, RangeSlider, RangeSliderArgs, SliderEvent, geometry::Size,
//! };
//!
//! let mut slider = RangeSlider::new(
//!     RangeSliderArgs::default()
//!         .step_value(5.0)
//!         .touch_slop(0.0),
//! )
//! .expect("valid arguments");
//! slider.set_bounds(Size::new(232.0, 64.0));
//! slider.add_listener(|event| {
//!     if let SliderEvent::LowerValueChanged(value) = event {
//!         println!("lower value is now {value}");
//!     }
//! });
//!
//! // The track runs from x = 16 to x = 216; drag the lower thumb to 42.
//! slider.on_pointer_down(PointerEvent::primary(16.0));
//! slider.on_pointer_move(PointerEvent::primary(100.0));
//! slider.on_pointer_up(PointerEvent::primary(100.0));
//! assert_eq!(slider.lower_value(), 40.0);
//! ```
//!
//! The crate never installs a `tracing` subscriber; hosts decide where logs
//! go.

#![deny(missing_docs, clippy::unwrap_used)]

pub mod args;
pub mod callback;
pub mod error;
pub mod event;
pub mod format;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod model;
pub mod slider;

pub use args::RangeSliderArgs;
pub use callback::CallbackWith;
pub use error::{ArgsError, FormatError};
pub use event::{ListenerId, SliderEvent};
pub use format::LabelFormat;
pub use gesture::{PointerEvent, Thumb};
pub use layout::{SliderLayout, SliderMetrics, TextMeasure};
pub use model::RangeModel;
pub use slider::{GestureArbiter, RangeSlider};
