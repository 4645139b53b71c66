use embedded_hal::{delay::DelayNs, digital::InputPin};
use log::warn;

use crate::{
    config::MenuConfig,
    input::Encoder,
    render::{MenuSurface, SurfaceMetrics},
};

/// Surface, encoder, button, and delay shared by a menu and its submenus.
#[derive(Debug)]
pub struct Devices<S, E, B, D> {
    pub(super) surface: S,
    encoder: E,
    button: B,
    delay: D,
    config: MenuConfig,
}

impl<S, E, B, D> Devices<S, E, B, D>
where
    S: MenuSurface,
    E: Encoder,
    B: InputPin,
    D: DelayNs,
{
    pub fn new(surface: S, encoder: E, button: B, delay: D, config: MenuConfig) -> Self {
        Self {
            surface,
            encoder,
            button,
            delay,
            config,
        }
    }

    pub fn metrics(&self) -> SurfaceMetrics {
        self.surface.metrics()
    }

    /// Encoder movement since the last poll. Read failures count as no
    /// movement.
    pub(super) fn read_delta(&mut self) -> i32 {
        match self.encoder.delta() {
            Ok(delta) => delta,
            Err(err) => {
                warn!("menu: encoder read failed err={:?}", err);
                0
            }
        }
    }

    /// Read failures count as released.
    pub(super) fn button_pressed(&mut self) -> bool {
        match self.button.is_high() {
            Ok(high) => high == self.config.button_pressed_level(),
            Err(err) => {
                warn!("menu: button read failed err={:?}", err);
                false
            }
        }
    }

    pub(super) fn debounce(&mut self) {
        self.delay.delay_ms(self.config.debounce_ms());
    }
}

impl<S, E, B, D> Devices<S, E, B, D> {
    pub fn config(&self) -> MenuConfig {
        self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn button(&self) -> &B {
        &self.button
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}
