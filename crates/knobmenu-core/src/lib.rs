#![cfg_attr(not(test), no_std)]

//! Rotary-encoder driven hierarchical menus for small displays.
//!
//! Items are declared up front, attached to a [`menu::Menu`], and driven by
//! [`menu::Navigator::run`] until an exit item is pressed. Rendering and input
//! devices are reached only through the traits in [`render`] and [`input`].

extern crate alloc;

pub mod config;
pub mod error;
pub mod input;
pub mod item;
pub mod menu;
pub mod policy;
pub mod render;
pub mod value;

pub use config::MenuConfig;
pub use error::{BuildError, SerializeError};
pub use item::{
    Action, DurationSpec, IntegerSpec, MenuContext, MenuItem, SelectSpec, SubMenuItem,
};
pub use menu::{Devices, Menu, Mode, Navigator, Outcome};
pub use value::{Record, Value};
