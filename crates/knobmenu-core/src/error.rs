//! Construction and serialization errors.

use alloc::string::String;
use core::fmt;

/// Reasons a menu or item could not be built. Construction fails fast; no
/// partially attached menu is ever returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A menu was given no items.
    EmptyMenu,
    /// Every item in the menu is a title, so the cursor has nowhere to rest.
    NoSelectableItem,
    /// Numeric default lies outside the declared bounds.
    DefaultOutOfRange {
        label: String,
        default: i64,
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    /// Select default is not one of the offered values.
    DefaultNotInValues { label: String },
    /// Select item offers no values at all.
    EmptyChoices { label: String },
    /// Surface cannot fit a single row of text.
    SurfaceTooSmall { height: u32, glyph_height: u32 },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMenu => f.write_str("empty menus are not allowed"),
            Self::NoSelectableItem => f.write_str("menu has no selectable item"),
            Self::DefaultOutOfRange {
                label,
                default,
                minimum,
                maximum,
            } => {
                write!(f, "invalid default {default} for {label:?}")?;
                if let Some(minimum) = minimum {
                    write!(f, ", needs to be >= {minimum}")?;
                }
                if let Some(maximum) = maximum {
                    write!(f, ", needs to be <= {maximum}")?;
                }
                Ok(())
            }
            Self::DefaultNotInValues { label } => {
                write!(f, "default for {label:?} is not one of its values")
            }
            Self::EmptyChoices { label } => write!(f, "{label:?} has no values to select"),
            Self::SurfaceTooSmall {
                height,
                glyph_height,
            } => write!(
                f,
                "surface height {height} cannot fit a {glyph_height} pixel row"
            ),
        }
    }
}

impl core::error::Error for BuildError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SerializeError {
    /// Two serializable items in one menu share a label.
    DuplicateKey(String),
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "duplicate key {key}"),
        }
    }
}

impl core::error::Error for SerializeError {}
