//! Configuration and label-format errors.

use thiserror::Error;

/// Errors raised when validating [`RangeSliderArgs`](crate::RangeSliderArgs).
///
/// Runtime setters never fail; they sanitise their input and log instead.
/// Validation only rejects configurations that cannot describe a slider.
#[derive(Debug, Error, PartialEq)]
pub enum ArgsError {
    /// A bound is NaN or infinite.
    #[error("slider bounds must be finite, got minimum {minimum} and maximum {maximum}")]
    NonFiniteBounds {
        /// Configured lower bound.
        minimum: f32,
        /// Configured upper bound.
        maximum: f32,
    },
    /// A value that must be a real number is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFiniteValue {
        /// Name of the argument.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A distance or granularity is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the argument.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A visual measurement is negative or not finite.
    #[error("slider metric {field} must be finite and non-negative, got {value}")]
    InvalidMetric {
        /// Name of the measurement.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The label format string cannot be parsed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors raised when parsing a label format string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The string is not of the form `F<digits>`.
    #[error("unsupported label format `{0}`, expected `F` followed by a digit count")]
    Unsupported(String),
    /// The digit count exceeds [`MAX_DECIMALS`](crate::format::MAX_DECIMALS).
    #[error("label format `{format}` asks for {decimals} decimals, at most {max} are supported")]
    TooManyDecimals {
        /// Offending format string.
        format: String,
        /// Requested decimals.
        decimals: usize,
        /// Supported maximum.
        max: usize,
    },
}
