//! Menu controller: cursor, pagination, edit mode, and submenu recursion.
//!
//! A [`Menu`] owns its items and their drawables. Devices are borrowed per
//! [`Menu::run`] call, so a submenu runs on exactly the same surface and input
//! as its parent and hands them back when it returns.

mod devices;
mod dispatch;
mod navigation;
mod navigator;

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

use embedded_hal::{delay::DelayNs, digital::InputPin};
use log::{debug, warn};

pub use devices::Devices;
pub use navigator::Navigator;

use crate::{
    error::{BuildError, SerializeError},
    input::Encoder,
    item::{MenuContext, MenuItem},
    policy,
    render::{MenuSurface, Scene, SurfaceMetrics},
    value::{Record, Value},
};

/// How a menu run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A final item was pressed, possibly inside a submenu.
    Exit(Value),
    /// A back item was pressed. Parents resume; a top-level run returns it.
    Back,
}

impl Outcome {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Exit(value) => Some(value),
            Self::Back => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Exit(value) => Some(value),
            Self::Back => None,
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(self, Self::Back)
    }
}

/// Where encoder rotation goes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Rotation moves the cursor.
    Browsing,
    /// Rotation edits the selected item.
    Editing,
}

#[derive(Debug)]
pub struct Menu {
    items: Vec<MenuItem>,
    scene: Scene,
    selected: usize,
    metrics: SurfaceMetrics,
    depth: usize,
}

impl Menu {
    /// Builds a top-level menu for a surface with the given metrics.
    pub fn new(items: Vec<MenuItem>, metrics: SurfaceMetrics) -> Result<Self, BuildError> {
        Self::attach(items, metrics, 0)
    }

    pub(crate) fn attach(
        mut items: Vec<MenuItem>,
        metrics: SurfaceMetrics,
        depth: usize,
    ) -> Result<Self, BuildError> {
        if items.is_empty() {
            return Err(BuildError::EmptyMenu);
        }

        let lines = policy::visible_lines(items.len(), metrics.height, metrics.glyph_height);
        if lines == 0 {
            return Err(BuildError::SurfaceTooSmall {
                height: metrics.height,
                glyph_height: metrics.glyph_height,
            });
        }

        let Some(selected) = items.iter().position(MenuItem::is_selectable) else {
            return Err(BuildError::NoSelectableItem);
        };

        for item in &mut items {
            item.attach(metrics, depth + 1)?;
        }

        let rows = items.iter().map(MenuItem::drawables).collect();
        let mut scene = Scene::new(rows, lines);
        scene.row_mut(selected).label_mut().set_highlight(true);
        scene.set_showing_page(policy::page_of(selected, lines));

        debug!(
            "menu: built depth={} items={} lines={} pages={} selected={}",
            depth,
            items.len(),
            lines,
            scene.page_count(),
            selected
        );

        Ok(Self {
            items,
            scene,
            selected,
            metrics,
            depth,
        })
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> &MenuItem {
        &self.items[self.selected]
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn lines(&self) -> usize {
        self.scene.lines()
    }

    pub fn page(&self) -> usize {
        self.scene.showing_page()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    pub fn metrics(&self) -> SurfaceMetrics {
        self.metrics
    }

    pub fn mode(&self) -> Mode {
        if self.selected_item().is_active() {
            Mode::Editing
        } else {
            Mode::Browsing
        }
    }

    /// Snapshot handed to callbacks. A menu that cannot serialize (duplicate
    /// labels) hands out an empty record.
    pub fn context(&self) -> MenuContext {
        let values = self.serialize().unwrap_or_else(|err| {
            warn!("menu: context without values depth={}: {}", self.depth, err);
            Record::new()
        });
        MenuContext {
            metrics: self.metrics,
            depth: self.depth,
            values,
        }
    }

    /// Shows the menu and blocks until an item exits it.
    ///
    /// Input is busy-polled: each iteration applies the encoder delta, then
    /// samples the button once.
    pub fn run<S, E, B, D>(&mut self, devices: &mut Devices<S, E, B, D>) -> Outcome
    where
        S: MenuSurface,
        E: Encoder,
        B: InputPin,
        D: DelayNs,
    {
        debug!(
            "menu: run depth={} selected={} page={}",
            self.depth,
            self.selected,
            self.page()
        );
        devices.surface.show(&self.scene);

        loop {
            let delta = devices.read_delta();
            if delta != 0 {
                self.rotate(delta, &mut devices.surface);
            }

            if !devices.button_pressed() {
                continue;
            }

            if let Some(outcome) = self.press(devices) {
                return outcome;
            }
        }
    }

    /// Label → value record of every serializable item, in display order.
    pub fn serialize(&self) -> Result<Record, SerializeError> {
        serialize_items(&self.items)
    }
}

pub(crate) fn serialize_items(items: &[MenuItem]) -> Result<Record, SerializeError> {
    let mut record = Record::new();
    for item in items {
        let Some(value) = item.serialize()? else {
            continue;
        };
        record.insert(item.label(), value)?;
    }
    Ok(record)
}
