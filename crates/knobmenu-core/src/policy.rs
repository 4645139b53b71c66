//! Shared numeric and pagination policies for menu rows.

use core::{fmt::Write, ops::Range};

use heapless::String;

/// Room for two 64-bit page counts plus brackets.
pub const PAGE_LABEL_BYTES: usize = 48;

/// Clamps `value` into the optional bounds. An absent bound leaves that side
/// unbounded.
pub fn clamp<T: PartialOrd>(value: T, lower: Option<T>, upper: Option<T>) -> T {
    let mut value = value;
    if let Some(lower) = lower
        && value < lower
    {
        value = lower;
    }
    if let Some(upper) = upper
        && value > upper
    {
        value = upper;
    }
    value
}

/// Visible rows per page for `item_count` items on a surface `height` pixels
/// tall with glyphs `glyph_height` pixels tall.
pub fn visible_lines(item_count: usize, height: u32, glyph_height: u32) -> usize {
    if glyph_height == 0 {
        return 0;
    }
    item_count.min((height / glyph_height) as usize)
}

pub fn page_count(item_count: usize, lines: usize) -> usize {
    if lines == 0 {
        return 0;
    }
    item_count.div_ceil(lines)
}

pub fn page_of(index: usize, lines: usize) -> usize {
    index / lines.max(1)
}

/// Index range of page `page` when `item_count` items are split into
/// consecutive groups of `lines`. The last page may be short.
pub fn page_range(page: usize, item_count: usize, lines: usize) -> Range<usize> {
    let start = page.saturating_mul(lines).min(item_count);
    let end = start.saturating_add(lines).min(item_count);
    start..end
}

pub fn digit_count(mut value: usize) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// `"[current/total]"` with both numbers zero-padded to the width of `total`.
/// `page` is zero based.
pub fn page_label(page: usize, total: usize) -> String<PAGE_LABEL_BYTES> {
    let width = digit_count(total);
    let mut out = String::new();
    let written = write!(
        out,
        "[{:0width$}/{:0width$}]",
        page.saturating_add(1),
        total,
        width = width
    );
    debug_assert!(written.is_ok(), "page label overflow");
    out
}
