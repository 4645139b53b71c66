use alloc::{format, string::String};
use core::fmt::Write;

use crate::{error::BuildError, policy::clamp};

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3_600;

/// Construction parameters for an integer row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntegerSpec {
    default: i64,
    minimum: Option<i64>,
    maximum: Option<i64>,
    suffix: String,
}

impl IntegerSpec {
    pub const fn new(default: i64) -> Self {
        Self {
            default,
            minimum: None,
            maximum: None,
            suffix: String::new(),
        }
    }

    pub fn percentage(default: i64) -> Self {
        Self::new(default).with_bounds(0, 100).with_suffix("%")
    }

    pub const fn with_minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub const fn with_maximum(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub const fn with_bounds(self, minimum: i64, maximum: i64) -> Self {
        self.with_minimum(minimum).with_maximum(maximum)
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntegerItem {
    value: i64,
    minimum: Option<i64>,
    maximum: Option<i64>,
    suffix: String,
}

impl IntegerItem {
    pub(super) fn build(label: &str, spec: IntegerSpec) -> Result<Self, BuildError> {
        let below = spec.minimum.is_some_and(|minimum| spec.default < minimum);
        let above = spec.maximum.is_some_and(|maximum| spec.default > maximum);
        if below || above {
            return Err(BuildError::DefaultOutOfRange {
                label: String::from(label),
                default: spec.default,
                minimum: spec.minimum,
                maximum: spec.maximum,
            });
        }

        Ok(Self {
            value: spec.default,
            minimum: spec.minimum,
            maximum: spec.maximum,
            suffix: spec.suffix,
        })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn minimum(&self) -> Option<i64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<i64> {
        self.maximum
    }

    pub(super) fn apply_delta(&mut self, delta: i32) {
        self.value = clamp(
            self.value.saturating_add(i64::from(delta)),
            self.minimum,
            self.maximum,
        );
    }

    pub(super) fn text(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }
}

/// Construction parameters for a duration row, all in seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DurationSpec {
    default: u32,
    maximum: Option<u32>,
    step: u32,
}

impl Default for DurationSpec {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DurationSpec {
    pub const fn new(default: u32) -> Self {
        Self {
            default,
            maximum: None,
            step: 1,
        }
    }

    pub const fn with_maximum(mut self, maximum: u32) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Seconds added per encoder detent.
    pub const fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DurationItem {
    seconds: u32,
    maximum: Option<u32>,
    step: u32,
}

impl DurationItem {
    pub(super) const fn new(spec: DurationSpec) -> Self {
        Self {
            seconds: spec.default,
            maximum: spec.maximum,
            step: spec.step,
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub(super) fn apply_delta(&mut self, delta: i32) {
        let next = i64::from(self.seconds) + i64::from(delta) * i64::from(self.step);
        let upper = self.maximum.map_or(i64::from(u32::MAX), i64::from);
        self.seconds = clamp(next, Some(0), Some(upper)) as u32;
    }

    pub(super) fn text(&self) -> String {
        format_duration(self.seconds, self.step)
    }
}

/// `"1h 2m 5s"` with zero components left out. Zero renders as `0` plus the
/// unit matching the step granularity.
pub fn format_duration(seconds: u32, step: u32) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    let mut out = String::new();
    for (amount, unit) in [(hours, 'h'), (minutes, 'm'), (secs, 's')] {
        if amount == 0 {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{amount}{unit}");
    }

    if out.is_empty() {
        let unit = match step {
            SECONDS_PER_MINUTE => 'm',
            SECONDS_PER_HOUR => 'h',
            _ => 's',
        };
        out.push('0');
        out.push(unit);
    }
    out
}
