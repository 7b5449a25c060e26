//! Text and numeric field constraints.
//!
//! Text and numeric rules are separate types so callers pick the rule set
//! statically; length bounds never apply to numbers and range bounds never
//! apply to text.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Comparison mode for length and range bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundMode {
    /// `min <= value <= max`.
    #[default]
    Inclusive,
    /// `min < value < max`. Matches the legacy board form behavior, where a
    /// value equal to a bound is rejected.
    Exclusive,
}

impl BoundMode {
    fn at_least(self, actual: i64, min: i64) -> bool {
        match self {
            Self::Inclusive => actual >= min,
            Self::Exclusive => actual > min,
        }
    }

    fn at_most(self, actual: i64, max: i64) -> bool {
        match self {
            Self::Inclusive => actual <= max,
            Self::Exclusive => actual < max,
        }
    }
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Value is missing or blank after trim.
    Required,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    BelowMin { min: i64, actual: i64 },
    AboveMax { max: i64, actual: i64 },
    /// Raw input could not be read as a whole, non-negative number.
    NotACount(String),
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "value is required"),
            Self::TooShort { min, actual } => {
                write!(f, "length {actual} is below the minimum of {min}")
            }
            Self::TooLong { max, actual } => {
                write!(f, "length {actual} exceeds the maximum of {max}")
            }
            Self::BelowMin { min, actual } => write!(f, "{actual} is below the minimum of {min}"),
            Self::AboveMax { max, actual } => write!(f, "{actual} exceeds the maximum of {max}"),
            Self::NotACount(raw) => write!(f, "`{raw}` is not a whole non-negative number"),
        }
    }
}

/// Constraints for a free-text field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConstraint {
    pub required: bool,
    /// Measured in characters over the untrimmed value.
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub bounds: BoundMode,
}

impl TextConstraint {
    /// Constraint requiring a non-blank value.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_bounds(mut self, bounds: BoundMode) -> Self {
        self.bounds = bounds;
        self
    }

    /// Returns whether `value` satisfies every active constraint.
    pub fn is_valid(&self, value: &str) -> bool {
        self.check(value).is_ok()
    }

    /// Checks `value` and returns every failed constraint.
    pub fn check(&self, value: &str) -> Result<(), Vec<ConstraintViolation>> {
        let mut violations = Vec::new();
        if self.required && value.trim().is_empty() {
            violations.push(ConstraintViolation::Required);
        }

        let actual = value.chars().count();
        if let Some(min) = self.min_length {
            if !self.bounds.at_least(to_i64(actual), to_i64(min)) {
                violations.push(ConstraintViolation::TooShort { min, actual });
            }
        }
        if let Some(max) = self.max_length {
            if !self.bounds.at_most(to_i64(actual), to_i64(max)) {
                violations.push(ConstraintViolation::TooLong { max, actual });
            }
        }

        into_result(violations)
    }
}

/// Constraints for a numeric field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConstraint {
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub bounds: BoundMode,
}

impl NumericConstraint {
    /// Constraint requiring a present value.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_bounds(mut self, bounds: BoundMode) -> Self {
        self.bounds = bounds;
        self
    }

    /// Returns whether `value` satisfies every active constraint.
    ///
    /// `None` models an empty input; it only fails `required`.
    pub fn is_valid(&self, value: Option<i64>) -> bool {
        self.check(value).is_ok()
    }

    /// Checks `value` and returns every failed constraint.
    pub fn check(&self, value: Option<i64>) -> Result<(), Vec<ConstraintViolation>> {
        let Some(actual) = value else {
            return if self.required {
                Err(vec![ConstraintViolation::Required])
            } else {
                Ok(())
            };
        };

        let mut violations = Vec::new();
        if let Some(min) = self.min {
            if !self.bounds.at_least(actual, min) {
                violations.push(ConstraintViolation::BelowMin { min, actual });
            }
        }
        if let Some(max) = self.max {
            if !self.bounds.at_most(actual, max) {
                violations.push(ConstraintViolation::AboveMax { max, actual });
            }
        }

        into_result(violations)
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn into_result(violations: Vec<ConstraintViolation>) -> Result<(), Vec<ConstraintViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
