//! Thumb label formatting.
//!
//! Labels are produced either from a fixed-point format string (`"F0"`,
//! `"F2"`, ...) or from a custom callback receiving the thumb and its value.

use std::str::FromStr;

use crate::{callback::CallbackWith, error::FormatError, gesture::Thumb};

/// Largest number of decimals accepted by a fixed-point format string.
pub const MAX_DECIMALS: usize = 9;

/// Decimals used when a format string is just `"F"`.
const DEFAULT_FIXED_DECIMALS: usize = 2;

/// Custom label formatter.
pub type LabelFormatter = CallbackWith<(Thumb, f32), String>;

/// How a thumb value is turned into label text.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelFormat {
    /// Fixed-point with the given number of decimals, rounding half away
    /// from zero.
    Fixed {
        /// Digits after the decimal point.
        decimals: usize,
    },
    /// Caller-supplied formatting.
    Custom(LabelFormatter),
}

impl Default for LabelFormat {
    fn default() -> Self {
        LabelFormat::Fixed { decimals: 0 }
    }
}

impl LabelFormat {
    /// Parses a fixed-point format string.
    ///
    /// Accepts `F`/`f` followed by an optional digit count. An empty string
    /// means `F0`, a bare `F` means two decimals.
    ///
    /// # Examples
    ///
    /// ```
    /// use range_slider_core::format::LabelFormat;
    ///
    /// assert_eq!(LabelFormat::parse("F1").unwrap(), LabelFormat::Fixed { decimals: 1 });
    /// assert!(LabelFormat::parse("N2").is_err());
    /// ```
    pub fn parse(format: &str) -> Result<Self, FormatError> {
        let trimmed = format.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let digits = trimmed
            .strip_prefix(['F', 'f'])
            .ok_or_else(|| FormatError::Unsupported(format.to_owned()))?;
        if digits.is_empty() {
            return Ok(LabelFormat::Fixed {
                decimals: DEFAULT_FIXED_DECIMALS,
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::Unsupported(format.to_owned()));
        }
        let decimals = digits
            .parse::<usize>()
            .map_err(|_| FormatError::Unsupported(format.to_owned()))?;
        if decimals > MAX_DECIMALS {
            return Err(FormatError::TooManyDecimals {
                format: format.to_owned(),
                decimals,
                max: MAX_DECIMALS,
            });
        }
        Ok(LabelFormat::Fixed { decimals })
    }

    /// Formats the value shown above `thumb`.
    pub fn format(&self, thumb: Thumb, value: f32) -> String {
        match self {
            LabelFormat::Fixed { decimals } => format_fixed(value, *decimals),
            LabelFormat::Custom(formatter) => formatter.call((thumb, value)),
        }
    }
}

impl FromStr for LabelFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<LabelFormatter> for LabelFormat {
    fn from(formatter: LabelFormatter) -> Self {
        LabelFormat::Custom(formatter)
    }
}

fn format_fixed(value: f32, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // Standard formatting rounds ties to even; labels round them away from zero.
    let scale = 10f64.powi(decimals as i32);
    let mut rounded = (f64::from(value) * scale).round() / scale;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{rounded:.decimals$}")
}
