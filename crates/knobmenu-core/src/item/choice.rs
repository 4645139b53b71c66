use alloc::{string::String, string::ToString, vec::Vec};

use crate::{error::BuildError, value::Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ToggleItem {
    value: bool,
}

impl ToggleItem {
    pub(super) const fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub(super) fn flip(&mut self) {
        self.value = !self.value;
    }

    pub(super) fn text(&self) -> &'static str {
        if self.value { "[x]" } else { "[ ]" }
    }
}

/// Construction parameters for a select row.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectSpec {
    values: Vec<Value>,
    default: Option<Value>,
    cycle_on_press: bool,
}

impl SelectSpec {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            default: None,
            cycle_on_press: false,
        }
    }

    /// Starts on `default` instead of the first value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// A press advances to the next value instead of entering edit mode.
    pub fn cycle_on_press(mut self) -> Self {
        self.cycle_on_press = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectItem {
    values: Vec<Value>,
    index: usize,
    cycle_on_press: bool,
}

impl SelectItem {
    pub(super) fn build(label: &str, spec: SelectSpec) -> Result<Self, BuildError> {
        if spec.values.is_empty() {
            return Err(BuildError::EmptyChoices {
                label: String::from(label),
            });
        }

        let index = match &spec.default {
            None => 0,
            Some(default) => spec
                .values
                .iter()
                .position(|value| value == default)
                .ok_or_else(|| BuildError::DefaultNotInValues {
                    label: String::from(label),
                })?,
        };

        Ok(Self {
            values: spec.values,
            index,
            cycle_on_press: spec.cycle_on_press,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &Value {
        &self.values[self.index]
    }

    pub fn cycles_on_press(&self) -> bool {
        self.cycle_on_press
    }

    /// `index = (index + delta) mod len`, wrapping both ways.
    pub(super) fn step(&mut self, delta: i32) {
        let len = self.values.len() as i64;
        self.index = (self.index as i64 + i64::from(delta)).rem_euclid(len) as usize;
    }

    pub(super) fn text(&self) -> String {
        self.value().to_string()
    }
}
