use log::debug;

use super::Menu;
use crate::{
    item::Edit,
    policy,
    render::{MenuSurface, Slot},
};

impl Menu {
    /// Applies one encoder delta.
    ///
    /// With the selected item in edit mode the delta edits its value and only
    /// the value drawable is repainted. Otherwise the cursor moves, skipping
    /// titles in the direction of travel, and only the two labels whose
    /// highlight changed are repainted (or the page is switched).
    pub fn rotate<S>(&mut self, delta: i32, surface: &mut S)
    where
        S: MenuSurface,
    {
        if delta == 0 {
            return;
        }

        let previous = self.selected;
        if self.items[previous].is_active() {
            let edit = self.items[previous].handle_delta(delta);
            assert!(
                edit == Edit::Applied,
                "menu: active item {:?} does not accept edit deltas",
                self.items[previous].label()
            );
            self.refresh_value(previous);
            debug!(
                "menu: edit item={} delta={} text={:?}",
                previous,
                delta,
                self.scene.drawable(Slot::Value(previous)).map(|label| label.text())
            );
            surface.repaint(&self.scene, Slot::Value(previous));
            return;
        }

        let next = self.step_selection(delta);
        self.set_label_highlight(previous, false);
        self.selected = next;
        self.set_label_highlight(next, true);

        let page = policy::page_of(next, self.scene.lines());
        if page != self.scene.showing_page() {
            self.scene.set_showing_page(page);
            debug!(
                "menu: move selected={} -> {} page={}/{}",
                previous,
                next,
                page + 1,
                self.scene.page_count()
            );
            surface.switch_page(&self.scene);
            return;
        }

        debug!("menu: move selected={} -> {}", previous, next);
        surface.repaint(&self.scene, Slot::Label(previous));
        surface.repaint(&self.scene, Slot::Label(next));
    }

    /// Target index for a cursor move of `delta`, wrapped modulo the item
    /// count and pushed past non-selectable items in the direction of motion.
    pub(super) fn step_selection(&self, delta: i32) -> usize {
        let len = self.items.len() as i64;
        let step = if delta > 0 { 1 } else { -1 };

        let mut index = (self.selected as i64 + i64::from(delta)).rem_euclid(len);
        while !self.items[index as usize].is_selectable() {
            index = (index + step).rem_euclid(len);
        }
        index as usize
    }

    pub(super) fn set_label_highlight(&mut self, index: usize, on: bool) {
        self.scene.row_mut(index).label_mut().set_highlight(on);
    }

    pub(super) fn refresh_value(&mut self, index: usize) {
        let Some(text) = self.items[index].render_text() else {
            return;
        };
        if let Some(label) = self.scene.row_mut(index).value_mut() {
            label.set_text(text);
        }
    }
}
