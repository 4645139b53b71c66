//! Menu rows and their per-variant behaviour.

mod choice;
mod flow;
mod numeric;

use alloc::{boxed::Box, string::String, vec::Vec};

pub use choice::{SelectItem, SelectSpec, ToggleItem};
pub use flow::{CallbackItem, FinalItem, SubMenuItem};
pub use numeric::{DurationItem, DurationSpec, IntegerItem, IntegerSpec, format_duration};

use crate::{
    error::{BuildError, SerializeError},
    menu::{Menu, Outcome},
    render::{Label, Row, SurfaceMetrics},
    value::{Record, Value},
};

/// Shared context handed to items that need it (callbacks).
#[derive(Clone, Debug, PartialEq)]
pub struct MenuContext {
    pub metrics: SurfaceMetrics,
    /// `0` for the top-level menu.
    pub depth: usize,
    /// Values of the menu the item sits in, taken just before the press.
    pub values: Record,
}

impl MenuContext {
    pub fn value(&self, label: &str) -> Option<&Value> {
        self.values.get(label)
    }
}

/// What the controller should do after a press on the selected item.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// The item entered or left edit mode.
    ActivationChange,
    /// Not a drill-in target. `changed` asks for the value text to be redrawn.
    Ignore { changed: bool },
    /// Leave the current menu with this outcome.
    Exit(Outcome),
    /// Run the item's child menu.
    SubMenu,
}

/// Result of routing an encoder delta to an item.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Edit {
    Applied,
    NotApplicable,
}

#[derive(Debug)]
pub enum ItemKind {
    Title,
    Final(FinalItem),
    Back,
    Callback(CallbackItem),
    Integer(IntegerItem),
    Duration(DurationItem),
    Toggle(ToggleItem),
    Select(SelectItem),
    SubMenu(SubMenuItem),
}

/// One row of a menu.
#[derive(Debug)]
pub struct MenuItem {
    label: String,
    kind: ItemKind,
    active: bool,
}

impl MenuItem {
    fn with_kind(label: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            label: label.into(),
            kind,
            active: false,
        }
    }

    /// Non-selectable header row.
    pub fn title(label: impl Into<String>) -> Self {
        Self::with_kind(label, ItemKind::Title)
    }

    /// Ends the run, returning [`Value::None`].
    pub fn exit(label: impl Into<String>) -> Self {
        Self::exit_with(label, Value::None)
    }

    /// Ends the run, returning `value`.
    pub fn exit_with(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_kind(label, ItemKind::Final(FinalItem::new(value.into())))
    }

    pub fn back() -> Self {
        Self::back_labeled(crate::config::BACK_LABEL)
    }

    /// Leaves a submenu and resumes the parent.
    pub fn back_labeled(label: impl Into<String>) -> Self {
        Self::with_kind(label, ItemKind::Back)
    }

    /// Invokes `callback` on press and stays on the current menu.
    pub fn callback(label: impl Into<String>, callback: impl FnMut(&MenuContext) + 'static) -> Self {
        Self::with_kind(
            label,
            ItemKind::Callback(CallbackItem::new(Box::new(callback))),
        )
    }

    pub fn integer(label: impl Into<String>, spec: IntegerSpec) -> Result<Self, BuildError> {
        let label = label.into();
        let item = IntegerItem::build(&label, spec)?;
        Ok(Self::with_kind(label, ItemKind::Integer(item)))
    }

    /// Integer bounded to `0..=100` with a `%` suffix.
    pub fn percentage(label: impl Into<String>, default: i64) -> Result<Self, BuildError> {
        Self::integer(label, IntegerSpec::percentage(default))
    }

    pub fn duration(label: impl Into<String>, spec: DurationSpec) -> Self {
        Self::with_kind(label, ItemKind::Duration(DurationItem::new(spec)))
    }

    pub fn toggle(label: impl Into<String>, default: bool) -> Self {
        Self::with_kind(label, ItemKind::Toggle(ToggleItem::new(default)))
    }

    pub fn select(label: impl Into<String>, spec: SelectSpec) -> Result<Self, BuildError> {
        let label = label.into();
        let item = SelectItem::build(&label, spec)?;
        Ok(Self::with_kind(label, ItemKind::Select(item)))
    }

    /// Opens a nested menu. A `Vec<MenuItem>` converts into a submenu that
    /// gets a trailing Back item.
    pub fn submenu(label: impl Into<String>, submenu: impl Into<SubMenuItem>) -> Self {
        Self::with_kind(label, ItemKind::SubMenu(submenu.into()))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn is_selectable(&self) -> bool {
        !matches!(self.kind, ItemKind::Title)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Child menu of a submenu item, once attached.
    pub fn submenu_menu(&self) -> Option<&Menu> {
        match &self.kind {
            ItemKind::SubMenu(item) => item.menu(),
            _ => None,
        }
    }

    /// Value-column text, `None` for rows without a value drawable.
    pub fn render_text(&self) -> Option<String> {
        match &self.kind {
            ItemKind::Integer(item) => Some(item.text()),
            ItemKind::Duration(item) => Some(item.text()),
            ItemKind::Toggle(item) => Some(String::from(item.text())),
            ItemKind::Select(item) => Some(item.text()),
            ItemKind::Title
            | ItemKind::Final(_)
            | ItemKind::Back
            | ItemKind::Callback(_)
            | ItemKind::SubMenu(_) => None,
        }
    }

    /// Routes an encoder delta into the item's value.
    pub fn handle_delta(&mut self, delta: i32) -> Edit {
        match &mut self.kind {
            ItemKind::Integer(item) => item.apply_delta(delta),
            ItemKind::Duration(item) => item.apply_delta(delta),
            ItemKind::Select(item) => item.step(delta),
            ItemKind::Title
            | ItemKind::Final(_)
            | ItemKind::Back
            | ItemKind::Callback(_)
            | ItemKind::Toggle(_)
            | ItemKind::SubMenu(_) => return Edit::NotApplicable,
        }
        Edit::Applied
    }

    pub fn handle_press(&mut self, context: &MenuContext) -> Action {
        match &mut self.kind {
            ItemKind::Title => Action::Ignore { changed: false },
            ItemKind::Final(item) => Action::Exit(Outcome::Exit(item.choose())),
            ItemKind::Back => Action::Exit(Outcome::Back),
            ItemKind::Callback(item) => {
                item.invoke(context);
                Action::Ignore { changed: false }
            }
            ItemKind::Toggle(item) => {
                item.flip();
                Action::Ignore { changed: true }
            }
            ItemKind::Select(item) if item.cycles_on_press() => {
                item.step(1);
                Action::Ignore { changed: true }
            }
            ItemKind::Integer(_) | ItemKind::Duration(_) | ItemKind::Select(_) => {
                self.active = !self.active;
                Action::ActivationChange
            }
            ItemKind::SubMenu(_) => Action::SubMenu,
        }
    }

    /// Value exposed in the result record, `None` when the row carries none.
    pub fn serialize(&self) -> Result<Option<Value>, SerializeError> {
        let value = match &self.kind {
            ItemKind::Title | ItemKind::Back | ItemKind::Callback(_) => return Ok(None),
            ItemKind::Final(item) => Value::Bool(item.chosen()),
            ItemKind::Integer(item) => Value::Int(item.value()),
            ItemKind::Duration(item) => Value::Int(i64::from(item.seconds())),
            ItemKind::Toggle(item) => Value::Bool(item.value()),
            ItemKind::Select(item) => item.value().clone(),
            ItemKind::SubMenu(item) => Value::Record(item.serialize()?),
        };
        Ok(Some(value))
    }

    /// Builds nested menus. Called once when the owning menu is built.
    pub(crate) fn attach(&mut self, metrics: SurfaceMetrics, depth: usize) -> Result<(), BuildError> {
        match &mut self.kind {
            ItemKind::SubMenu(item) => item.attach(metrics, depth),
            _ => Ok(()),
        }
    }

    pub(crate) fn submenu_mut(&mut self) -> Option<&mut Menu> {
        match &mut self.kind {
            ItemKind::SubMenu(item) => item.menu_mut(),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Fresh drawables for this row. Titles render inverted.
    pub(crate) fn drawables(&self) -> Row {
        let label = if self.is_selectable() {
            Label::plain(self.label.as_str())
        } else {
            Label::inverted(self.label.as_str())
        };
        Row::new(label, self.render_text().map(Label::plain))
    }
}

impl From<Vec<MenuItem>> for SubMenuItem {
    fn from(items: Vec<MenuItem>) -> Self {
        SubMenuItem::new(items)
    }
}
