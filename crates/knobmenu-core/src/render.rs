//! Retained drawables and the surface contract consumed by the controller.
//!
//! Every item owns one [`Row`]: a label drawable and, for editable items, a
//! value drawable. Rows are grouped into pages of [`Scene::lines`] rows laid
//! out on a two-column grid. A row without a value lets its label span both
//! columns. The controller mutates the scene and then tells the surface which
//! drawables changed; the surface decides how to put pixels on glass.

use alloc::{string::String, vec::Vec};

use crate::policy;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Black,
    White,
}

/// One text drawable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Label {
    text: String,
    foreground: Color,
    background: Color,
}

impl Label {
    pub fn new(text: impl Into<String>, foreground: Color, background: Color) -> Self {
        Self {
            text: text.into(),
            foreground,
            background,
        }
    }

    /// Light text on a dark background.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Color::White, Color::Black)
    }

    /// Dark text on a light background.
    pub fn inverted(text: impl Into<String>) -> Self {
        Self::new(text, Color::Black, Color::White)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn foreground(&self) -> Color {
        self.foreground
    }

    pub const fn background(&self) -> Color {
        self.background
    }

    pub fn is_highlighted(&self) -> bool {
        self.background == Color::White
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_highlight(&mut self, on: bool) {
        if on {
            self.foreground = Color::Black;
            self.background = Color::White;
        } else {
            self.foreground = Color::White;
            self.background = Color::Black;
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    label: Label,
    value: Option<Label>,
}

impl Row {
    pub const fn new(label: Label, value: Option<Label>) -> Self {
        Self { label, value }
    }

    pub const fn label(&self) -> &Label {
        &self.label
    }

    pub const fn value(&self) -> Option<&Label> {
        self.value.as_ref()
    }

    pub(crate) fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut Label> {
        self.value.as_mut()
    }
}

/// Addresses one drawable of a scene. Item slots use the item index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    Label(usize),
    Value(usize),
    PageLabel,
}

/// Grid placement on the visible page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cell {
    pub column: u8,
    pub row: usize,
    pub span: u8,
}

/// Pixel geometry of the surface and its fixed-width font.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SurfaceMetrics {
    pub width: u32,
    pub height: u32,
    pub glyph_width: u32,
    pub glyph_height: u32,
}

impl SurfaceMetrics {
    pub const fn new(width: u32, height: u32, glyph_width: u32, glyph_height: u32) -> Self {
        Self {
            width,
            height,
            glyph_width,
            glyph_height,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scene {
    rows: Vec<Row>,
    lines: usize,
    page_count: usize,
    showing_page: usize,
    page_label: Label,
}

impl Scene {
    pub(crate) fn new(rows: Vec<Row>, lines: usize) -> Self {
        let page_count = policy::page_count(rows.len(), lines);
        let page_label = Label::plain(policy::page_label(0, page_count).as_str());
        Self {
            rows,
            lines,
            page_count,
            showing_page: 0,
            page_label,
        }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn showing_page(&self) -> usize {
        self.showing_page
    }

    pub fn page_label(&self) -> &Label {
        &self.page_label
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows on the showing page with their item index.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        let range = policy::page_range(self.showing_page, self.rows.len(), self.lines);
        let start = range.start;
        self.rows[range]
            .iter()
            .enumerate()
            .map(move |(offset, row)| (start + offset, row))
    }

    /// Every drawable slot on the showing page, page label last.
    pub fn visible_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.visible_rows()
            .flat_map(|(index, row)| {
                let value = row.value.as_ref().map(|_| Slot::Value(index));
                core::iter::once(Slot::Label(index)).chain(value)
            })
            .chain(core::iter::once(Slot::PageLabel))
    }

    pub fn drawable(&self, slot: Slot) -> Option<&Label> {
        match slot {
            Slot::Label(index) => self.rows.get(index).map(Row::label),
            Slot::Value(index) => self.rows.get(index).and_then(Row::value),
            Slot::PageLabel => Some(&self.page_label),
        }
    }

    /// Grid cell of an item drawable, `None` when it is not on the showing
    /// page (or for the page label, which sits outside the grid).
    pub fn cell(&self, slot: Slot) -> Option<Cell> {
        let (index, column) = match slot {
            Slot::Label(index) => (index, 0),
            Slot::Value(index) => (index, 1),
            Slot::PageLabel => return None,
        };
        let row = self.rows.get(index)?;
        if policy::page_of(index, self.lines) != self.showing_page {
            return None;
        }
        if column == 1 && row.value.is_none() {
            return None;
        }

        let span = if column == 0 && row.value.is_none() { 2 } else { 1 };
        Some(Cell {
            column,
            row: index % self.lines.max(1),
            span,
        })
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> &mut Row {
        &mut self.rows[index]
    }

    pub(crate) fn set_showing_page(&mut self, page: usize) {
        self.showing_page = page;
        self.page_label
            .set_text(String::from(policy::page_label(page, self.page_count).as_str()));
    }
}

/// Display plus layout collaborator.
pub trait MenuSurface {
    fn metrics(&self) -> SurfaceMetrics;

    /// Attach the scene and draw its showing page in full.
    fn show(&mut self, scene: &Scene);

    /// Detach whatever is shown.
    fn hide(&mut self);

    /// Redraw a single drawable after its text or colours changed.
    fn repaint(&mut self, scene: &Scene, slot: Slot);

    /// The showing page changed.
    fn switch_page(&mut self, scene: &Scene) {
        self.show(scene);
    }
}
