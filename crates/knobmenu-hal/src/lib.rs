#![cfg_attr(not(test), no_std)]

//! Board-facing adapters for `knobmenu-core`: a polled quadrature decoder and
//! an `embedded-graphics` menu surface.

pub mod input;
pub mod render;
