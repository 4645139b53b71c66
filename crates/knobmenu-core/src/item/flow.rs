use alloc::{boxed::Box, vec::Vec};
use core::{fmt, mem};

use log::debug;

use super::{MenuContext, MenuItem};
use crate::{
    error::{BuildError, SerializeError},
    menu::{self, Menu},
    render::SurfaceMetrics,
    value::{Record, Value},
};

#[derive(Clone, Debug, PartialEq)]
pub struct FinalItem {
    value: Value,
    chosen: bool,
}

impl FinalItem {
    pub(super) const fn new(value: Value) -> Self {
        Self {
            value,
            chosen: false,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether this item ended a run.
    pub fn chosen(&self) -> bool {
        self.chosen
    }

    pub(super) fn choose(&mut self) -> Value {
        self.chosen = true;
        self.value.clone()
    }
}

pub struct CallbackItem {
    callback: Box<dyn FnMut(&MenuContext)>,
}

impl CallbackItem {
    pub(super) fn new(callback: Box<dyn FnMut(&MenuContext)>) -> Self {
        Self { callback }
    }

    pub(super) fn invoke(&mut self, context: &MenuContext) {
        (self.callback)(context);
    }
}

impl fmt::Debug for CallbackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackItem").finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum SubMenuState {
    Pending {
        items: Vec<MenuItem>,
        back: Option<Box<MenuItem>>,
    },
    Attached(Box<Menu>),
}

/// Nested item list, turned into a child [`Menu`] when the parent is built.
#[derive(Debug)]
pub struct SubMenuItem {
    state: SubMenuState,
}

impl SubMenuItem {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            state: SubMenuState::Pending {
                items,
                back: Some(Box::new(MenuItem::back())),
            },
        }
    }

    /// Leaves the child list as given, without a trailing Back item.
    pub fn without_back(mut self) -> Self {
        if let SubMenuState::Pending { back, .. } = &mut self.state {
            *back = None;
        }
        self
    }

    pub fn with_back_label(mut self, label: &str) -> Self {
        if let SubMenuState::Pending { back, .. } = &mut self.state {
            *back = Some(Box::new(MenuItem::back_labeled(label)));
        }
        self
    }

    pub fn menu(&self) -> Option<&Menu> {
        match &self.state {
            SubMenuState::Attached(menu) => Some(&**menu),
            SubMenuState::Pending { .. } => None,
        }
    }

    pub(super) fn menu_mut(&mut self) -> Option<&mut Menu> {
        match &mut self.state {
            SubMenuState::Attached(menu) => Some(&mut **menu),
            SubMenuState::Pending { .. } => None,
        }
    }

    pub(super) fn attach(&mut self, metrics: SurfaceMetrics, depth: usize) -> Result<(), BuildError> {
        let SubMenuState::Pending { items, back } = &mut self.state else {
            return Ok(());
        };

        let mut items = mem::take(items);
        if let Some(back) = back.take() {
            items.push(*back);
        }
        debug!("menu: attach submenu depth={} items={}", depth, items.len());

        let child = Menu::attach(items, metrics, depth)?;
        self.state = SubMenuState::Attached(Box::new(child));
        Ok(())
    }

    pub(super) fn serialize(&self) -> Result<Record, SerializeError> {
        match &self.state {
            SubMenuState::Attached(menu) => menu.serialize(),
            SubMenuState::Pending { items, .. } => menu::serialize_items(items),
        }
    }
}
