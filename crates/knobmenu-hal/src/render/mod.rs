//! `MenuSurface` over any monochrome `embedded-graphics` target.
//!
//! The visible page is laid out on a two-column grid that fills the target:
//! one row per menu line, the label in the left column and the value in the
//! right one. The page label sits in the bottom right corner on top of the
//! grid. Buffered drivers flush through the present hook after each change.


use embedded_graphics::{
    draw_target::DrawTargetExt,
    mono_font::{MonoFont, MonoTextStyleBuilder, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use knobmenu_core::render::{Cell, Color, Label, MenuSurface, Scene, Slot, SurfaceMetrics};

pub type PresentFn<D> = fn(&mut D);

fn present_nothing<D>(_: &mut D) {}

pub struct GraphicsSurface<D, F> {
    target: D,
    present: F,
    font: &'static MonoFont<'static>,
    visible: bool,
}

impl<D> GraphicsSurface<D, PresentFn<D>>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    /// Surface for targets that show pixels as soon as they are drawn.
    pub fn new(target: D) -> Self {
        Self::with_present(target, present_nothing::<D>)
    }
}

impl<D, F> GraphicsSurface<D, F>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
    F: FnMut(&mut D),
{
    /// `present` runs after every change, e.g. to flush a frame buffer.
    pub fn with_present(target: D, present: F) -> Self {
        Self {
            target,
            present,
            font: &FONT_6X10,
            visible: false,
        }
    }

    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn glyph_size(&self) -> Size {
        Size::new(
            self.font.character_size.width + self.font.character_spacing,
            self.font.character_size.height,
        )
    }

    /// Pixel rectangle of a grid cell on the showing page.
    fn cell_area(&self, scene: &Scene, cell: Cell) -> Rectangle {
        let size = self.target.size();
        let lines = scene.lines().max(1) as u32;
        let column_width = size.width / 2;
        let row_height = size.height / lines;

        let x = u32::from(cell.column) * column_width;
        let width = (u32::from(cell.span) * column_width).min(size.width - x);
        Rectangle::new(
            Point::new(x as i32, (cell.row as u32 * row_height) as i32),
            Size::new(width, row_height),
        )
    }

    fn page_label_area(&self, label: &Label) -> Rectangle {
        let size = self.target.size();
        let glyph = self.glyph_size();
        let width = (glyph.width * label.text().len() as u32).min(size.width);
        let height = glyph.height.min(size.height);
        Rectangle::new(
            Point::new((size.width - width) as i32, (size.height - height) as i32),
            Size::new(width, height),
        )
    }

    fn draw_label(&mut self, label: &Label, area: Rectangle) {
        let background = binary(label.background());
        let _ = area
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(&mut self.target);

        let style = MonoTextStyleBuilder::new()
            .font(self.font)
            .text_color(binary(label.foreground()))
            .build();
        let glyph_height = self.glyph_size().height;
        let top = area.top_left.y + (area.size.height.saturating_sub(glyph_height) / 2) as i32;

        let mut clipped = self.target.clipped(&area);
        let _ = Text::with_baseline(
            label.text(),
            Point::new(area.top_left.x, top),
            style,
            Baseline::Top,
        )
        .draw(&mut clipped);
    }

    fn draw_slot(&mut self, scene: &Scene, slot: Slot) {
        let Some(label) = scene.drawable(slot) else {
            return;
        };
        let area = match slot {
            Slot::PageLabel => self.page_label_area(label),
            Slot::Label(_) | Slot::Value(_) => match scene.cell(slot) {
                Some(cell) => self.cell_area(scene, cell),
                None => return,
            },
        };
        self.draw_label(label, area);
    }
}

impl<D, F> MenuSurface for GraphicsSurface<D, F>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
    F: FnMut(&mut D),
{
    fn metrics(&self) -> SurfaceMetrics {
        let size = self.target.size();
        let glyph = self.glyph_size();
        SurfaceMetrics::new(size.width, size.height, glyph.width, glyph.height)
    }

    fn show(&mut self, scene: &Scene) {
        let _ = self.target.clear(BinaryColor::Off);
        for slot in scene.visible_slots() {
            self.draw_slot(scene, slot);
        }
        self.visible = true;
        (self.present)(&mut self.target);
    }

    fn hide(&mut self) {
        let _ = self.target.clear(BinaryColor::Off);
        self.visible = false;
        (self.present)(&mut self.target);
    }

    fn repaint(&mut self, scene: &Scene, slot: Slot) {
        if !self.visible {
            return;
        }
        self.draw_slot(scene, slot);
        // A cell background may have covered the page label.
        if slot != Slot::PageLabel {
            self.draw_slot(scene, Slot::PageLabel);
        }
        (self.present)(&mut self.target);
    }
}

fn binary(color: Color) -> BinaryColor {
    match color {
        Color::White => BinaryColor::On,
        Color::Black => BinaryColor::Off,
    }
}
