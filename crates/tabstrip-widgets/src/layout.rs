//! Row layout for expandable tab bars.
//!
//! Entries are placed row-major in uniform slots. A slot is as wide as the
//! widest item plus spacing on both sides, so the number of slots per row
//! only depends on the available width. When an overflow item is installed
//! and the items need more than `max_rows` rows, the final slot of the final
//! row becomes the more entry and every item that does not fit before it is
//! folded.
//!
//! [`compute_layout`] is pure: the same inputs always give the same layout.

use crate::item::{DisplayEntry, TabItem};
use std::ops::Range;
use tabstrip_core::{Point, Rect, Size};

// Keeps exact fits (e.g. 4 slots of 80 in 320) from losing a slot to rounding.
const FIT_EPSILON: f32 = 1e-3;

/// Measurements the slot size is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemMetrics {
    /// Size icons are drawn at
    pub icon_size: Size,
    /// Height of the title line
    pub title_line_height: f32,
    /// Advance width of one title character
    pub glyph_width: f32,
}

impl ItemMetrics {
    /// Width of `title` when drawn.
    #[must_use]
    pub fn title_width(&self, title: &str) -> f32 {
        title.chars().count() as f32 * self.glyph_width
    }

    /// Content size of an item, without spacing.
    #[must_use]
    pub fn content_size(&self, item: &TabItem) -> Size {
        let icon = item.icon().map_or(Size::ZERO, |_| self.icon_size);
        let (title_width, title_height) = item
            .title()
            .filter(|t| !t.is_empty())
            .map_or((0.0, 0.0), |t| (self.title_width(t), self.title_line_height));
        Size::new(icon.width.max(title_width), icon.height + title_height)
    }
}

/// Inputs besides the items themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Width available to the bar
    pub available_width: f32,
    /// Spacing around each item
    pub item_spacing: f32,
    /// Row cap applied when an overflow item exists
    pub max_rows: usize,
}

/// Result of laying out a tab bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TabLayout {
    /// Number of rows in use
    pub rows: usize,
    /// Height of one row
    pub row_height: f32,
    /// Left inset that centres the slot grid on whole pixels
    pub padding: f32,
    /// Width of one slot
    pub slot_width: f32,
    /// Slots in a full row
    pub per_row: usize,
    /// Displayed entries in slot order
    pub entries: Vec<DisplayEntry>,
    /// Item indices hidden behind the more entry
    pub folded: Range<usize>,
}

impl TabLayout {
    /// Layout with nothing to show.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rows: 0,
            row_height: 0.0,
            padding: 0.0,
            slot_width: 0.0,
            per_row: 0,
            entries: Vec::new(),
            folded: 0..0,
        }
    }

    /// Total height of all rows.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.row_height
    }

    /// Whether trailing items were folded behind the more entry.
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        !self.folded.is_empty()
    }

    /// Frame of `slot` for a bar whose top-left corner is `origin`.
    #[must_use]
    pub fn slot_frame(&self, slot: usize, origin: Point) -> Option<Rect> {
        if slot >= self.entries.len() || self.per_row == 0 {
            return None;
        }
        let row = slot / self.per_row;
        let col = slot % self.per_row;
        Some(Rect::new(
            (col as f32).mul_add(self.slot_width, origin.x + self.padding),
            (row as f32).mul_add(self.row_height, origin.y),
            self.slot_width,
            self.row_height,
        ))
    }

    /// Slot under `point`, if any.
    #[must_use]
    pub fn slot_at(&self, origin: Point, point: Point) -> Option<usize> {
        if self.per_row == 0 || self.slot_width <= 0.0 || self.row_height <= 0.0 {
            return None;
        }
        let local = point - origin;
        let local_x = local.x - self.padding;
        if local_x < 0.0 || local.y < 0.0 {
            return None;
        }
        let col = (local_x / self.slot_width) as usize;
        let row = (local.y / self.row_height) as usize;
        if col >= self.per_row || row >= self.rows {
            return None;
        }
        let slot = row * self.per_row + col;
        (slot < self.entries.len()).then_some(slot)
    }

    /// Slot holding the more entry.
    #[must_use]
    pub fn more_slot(&self) -> Option<usize> {
        self.entries.iter().position(|e| *e == DisplayEntry::More)
    }

    /// Slot showing the item at `index`.
    #[must_use]
    pub fn slot_of_item(&self, index: usize) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| *e == DisplayEntry::Item(index))
    }
}

impl Default for TabLayout {
    fn default() -> Self {
        Self::empty()
    }
}

/// Width of one slot for these items.
#[must_use]
pub fn slot_width(
    items: &[TabItem],
    more_item: Option<&TabItem>,
    metrics: &ItemMetrics,
    item_spacing: f32,
) -> f32 {
    let widest = items
        .iter()
        .chain(more_item)
        .map(|item| metrics.content_size(item).width)
        .fold(0.0f32, f32::max);
    2.0f32.mul_add(item_spacing, widest)
}

/// Lay out `items` (and the optional overflow item) into rows.
#[must_use]
pub fn compute_layout(
    items: &[TabItem],
    more_item: Option<&TabItem>,
    metrics: &ItemMetrics,
    params: &LayoutParams,
) -> TabLayout {
    let spacing = params.item_spacing.max(0.0);
    let width = params.available_width;
    if items.is_empty() || !width.is_finite() || width <= 0.0 {
        return TabLayout::empty();
    }

    let slot_width = slot_width(items, more_item, metrics, spacing);
    if !slot_width.is_finite() || slot_width <= 0.0 {
        return TabLayout::empty();
    }
    let per_row = ((width + FIT_EPSILON) / slot_width).floor() as usize;
    if per_row == 0 {
        return TabLayout::empty();
    }

    let count = items.len();
    let natural_rows = count.div_ceil(per_row);
    let max_rows = params.max_rows.max(1);

    let (rows, entries, folded) = if more_item.is_some() && natural_rows > max_rows {
        let shown = max_rows * per_row - 1;
        let mut entries: Vec<DisplayEntry> = (0..shown).map(DisplayEntry::Item).collect();
        entries.push(DisplayEntry::More);
        (max_rows, entries, shown..count)
    } else {
        let entries = (0..count).map(DisplayEntry::Item).collect();
        (natural_rows, entries, count..count)
    };

    let tallest = items
        .iter()
        .chain(more_item)
        .map(|item| metrics.content_size(item).height)
        .fold(0.0f32, f32::max);
    let row_height = 2.0f32.mul_add(spacing, tallest);
    let padding = ((per_row as f32).mul_add(-slot_width, width) / 2.0)
        .floor()
        .max(0.0);

    TabLayout {
        rows,
        row_height,
        padding,
        slot_width,
        per_row,
        entries,
        folded,
    }
}
