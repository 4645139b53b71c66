use alloc::vec::Vec;

use embedded_hal::{delay::DelayNs, digital::InputPin};
use log::info;

use super::{Devices, Menu, Outcome};
use crate::{
    error::{BuildError, SerializeError},
    input::Encoder,
    item::MenuItem,
    render::MenuSurface,
    value::Record,
};

/// A top-level menu bound to the devices it runs on.
pub struct Navigator<S, E, B, D> {
    menu: Menu,
    devices: Devices<S, E, B, D>,
}

impl<S, E, B, D> Navigator<S, E, B, D>
where
    S: MenuSurface,
    E: Encoder,
    B: InputPin,
    D: DelayNs,
{
    /// Builds the menu tree against the surface's metrics.
    pub fn new(items: Vec<MenuItem>, devices: Devices<S, E, B, D>) -> Result<Self, BuildError> {
        let menu = Menu::new(items, devices.metrics())?;
        Ok(Self { menu, devices })
    }

    /// Blocks until an item exits the top-level menu.
    pub fn run(&mut self) -> Outcome {
        let outcome = self.menu.run(&mut self.devices);
        info!("menu: finished outcome={:?}", outcome);
        outcome
    }

    pub fn serialize(&self) -> Result<Record, SerializeError> {
        self.menu.serialize()
    }

    /// Runs, then serializes the values the user left behind.
    pub fn run_collect(&mut self) -> Result<(Outcome, Record), SerializeError> {
        let outcome = self.run();
        let record = self.serialize()?;
        Ok((outcome, record))
    }
}

impl<S, E, B, D> Navigator<S, E, B, D> {
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        &mut self.menu
    }

    pub fn devices(&self) -> &Devices<S, E, B, D> {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut Devices<S, E, B, D> {
        &mut self.devices
    }
}
