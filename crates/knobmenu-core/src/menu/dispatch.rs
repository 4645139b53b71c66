use alloc::string::String;

use embedded_hal::{delay::DelayNs, digital::InputPin};
use log::debug;

use super::{Devices, Menu, Outcome};
use crate::{
    input::Encoder,
    item::Action,
    render::{MenuSurface, Slot},
};

impl Menu {
    /// Dispatches one button press on the selected item.
    ///
    /// Returns `Some` when this menu is done. Every dispatch ends with the
    /// configured debounce wait before input is sampled again.
    pub fn press<S, E, B, D>(&mut self, devices: &mut Devices<S, E, B, D>) -> Option<Outcome>
    where
        S: MenuSurface,
        E: Encoder,
        B: InputPin,
        D: DelayNs,
    {
        let index = self.selected;
        let context = self.context();
        let action = self.items[index].handle_press(&context);
        self.assert_single_active();

        match action {
            Action::ActivationChange => {
                let active = self.items[index].is_active();
                self.set_label_highlight(index, !active);
                if let Some(value) = self.scene.row_mut(index).value_mut() {
                    value.set_highlight(active);
                }
                debug!("menu: activation item={} active={}", index, active);
                devices.surface.repaint(&self.scene, Slot::Label(index));
                devices.surface.repaint(&self.scene, Slot::Value(index));
                devices.debounce();
                None
            }
            Action::Ignore { changed } => {
                if changed {
                    self.refresh_value(index);
                    devices.surface.repaint(&self.scene, Slot::Value(index));
                }
                devices.debounce();
                None
            }
            Action::Exit(outcome) => {
                debug!(
                    "menu: exit depth={} item={} back={}",
                    self.depth,
                    index,
                    outcome.is_back()
                );
                devices.debounce();
                if self.is_root() {
                    devices.surface.hide();
                }
                Some(outcome)
            }
            Action::SubMenu => self.enter_submenu(index, devices),
        }
    }

    fn enter_submenu<S, E, B, D>(
        &mut self,
        index: usize,
        devices: &mut Devices<S, E, B, D>,
    ) -> Option<Outcome>
    where
        S: MenuSurface,
        E: Encoder,
        B: InputPin,
        D: DelayNs,
    {
        let item = &mut self.items[index];
        assert!(
            !item.is_active(),
            "menu: submenu item {:?} entered while active",
            item.label()
        );
        let label = String::from(item.label());
        let Some(child) = item.submenu_mut() else {
            panic!("menu: submenu item {:?} was never attached", label);
        };

        devices.debounce();
        debug!("menu: enter submenu {:?} depth={}", label, self.depth + 1);
        let outcome = child.run(devices);

        if outcome.is_back() {
            debug!("menu: leave submenu {:?} depth={}", label, self.depth + 1);
            devices.surface.show(&self.scene);
            devices.debounce();
            return None;
        }

        if self.is_root() {
            devices.surface.hide();
        }
        Some(outcome)
    }

    fn assert_single_active(&self) {
        let mut active = self.items.iter().filter(|item| item.is_active());
        if let (Some(first), Some(second)) = (active.next(), active.next()) {
            panic!(
                "menu: items {:?} and {:?} are both active",
                first.label(),
                second.label()
            );
        }
    }
}
