//! Expandable tab bar widget.
//!
//! The bar grows to as many rows as its items need. Once an overflow item is
//! installed and the items outgrow `max_rows`, trailing items fold behind it.

use crate::error::TabBarError;
use crate::item::{DisplayEntry, ItemId, TabItem};
use crate::layout::{compute_layout, LayoutParams, TabLayout};
use crate::style::TabBarStyle;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tabstrip_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Image, Interpolate, Point, Pointer, PressPhase, Rect,
    Size, Transition, Tween, TypeId, Widget,
};

/// Message emitted by a tab bar in response to a tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabBarMessage {
    /// A regular item was selected.
    ItemSelected {
        /// Selected item
        id: ItemId,
        /// Its index in the item list
        index: usize,
    },
    /// The more entry was tapped.
    MoreTapped {
        /// Items folded behind it, in order
        folded: Vec<ItemId>,
    },
}

/// Receives selection requests from a [`TabBar`].
///
/// Every method has a default, so an implementation only overrides what it
/// needs. Without a delegate every selection is approved.
pub trait TabBarDelegate {
    /// Whether a tapped item may become selected.
    fn should_select_item(&mut self, _bar: &TabBar, _item: &TabItem) -> bool {
        true
    }

    /// Called after a tapped item became selected.
    fn did_select_item(&mut self, _bar: &TabBar, _item: &TabItem) {}

    /// Called when the more entry is tapped, with the folded items.
    fn did_tap_more(&mut self, _bar: &TabBar, _folded: &[TabItem]) {}
}

/// Delegate that approves every selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl TabBarDelegate for AutoApprove {}

#[derive(Debug, Clone)]
struct IconSet {
    normal: Arc<Image>,
    highlighted: Arc<Image>,
}

impl IconSet {
    fn render(item: &TabItem, style: &TabBarStyle) -> Option<Self> {
        let source = item.icon()?;
        match source.resized(style.icon_size) {
            Ok(scaled) => Some(Self {
                normal: Arc::new(scaled.tinted(style.normal_tint)),
                highlighted: Arc::new(scaled.tinted(style.selected_tint)),
            }),
            Err(e) => {
                log::warn!("icon of '{}' not rendered: {e}", item.id());
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    slot: usize,
    inside: bool,
    pointer: Pointer,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EntryKey {
    Item(ItemId),
    More,
}

#[derive(Debug, Clone)]
struct ItemTransition {
    from: HashMap<EntryKey, Rect>,
    tween: Tween,
}

/// Multi-row tab bar with overflow folding.
pub struct TabBar {
    items: Vec<TabItem>,
    icons: Vec<Option<IconSet>>,
    more_item: Option<TabItem>,
    more_icons: Option<IconSet>,
    selected: Option<ItemId>,
    more_highlighted: bool,
    pressed: Option<Press>,
    style: TabBarStyle,
    selected_background_image: Option<Arc<Image>>,
    layout: TabLayout,
    bounds: Rect,
    transition: Option<ItemTransition>,
    delegate: Option<Box<dyn TabBarDelegate + Send + Sync>>,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
}

impl fmt::Debug for TabBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabBar")
            .field("items", &self.items)
            .field("more_item", &self.more_item)
            .field("selected", &self.selected)
            .field("layout", &self.layout)
            .field("bounds", &self.bounds)
            .field("has_delegate", &self.delegate.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TabBar {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            icons: Vec::new(),
            more_item: None,
            more_icons: None,
            selected: None,
            more_highlighted: false,
            pressed: None,
            style: TabBarStyle::default(),
            selected_background_image: None,
            layout: TabLayout::empty(),
            bounds: Rect::default(),
            transition: None,
            delegate: None,
            accessible_name_value: None,
            test_id_value: None,
        }
    }
}

impl TabBar {
    /// Create an empty tab bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a style.
    #[must_use]
    pub fn with_style(mut self, style: TabBarStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Install a delegate.
    #[must_use]
    pub fn with_delegate(mut self, delegate: impl TabBarDelegate + Send + Sync + 'static) -> Self {
        self.delegate = Some(Box::new(delegate));
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // ===== Configuration =====

    /// Replace the style, re-rendering icons and re-laying out.
    pub fn set_style(&mut self, mut style: TabBarStyle) {
        style.item_spacing = clamp_spacing(style.item_spacing);
        style.max_rows = style.max_rows.max(1);
        self.style = style;
        self.icons = self
            .items
            .iter()
            .map(|item| IconSet::render(item, &self.style))
            .collect();
        self.more_icons = self
            .more_item
            .as_ref()
            .and_then(|item| IconSet::render(item, &self.style));
        self.relayout();
    }

    /// Current style.
    #[must_use]
    pub const fn style(&self) -> &TabBarStyle {
        &self.style
    }

    /// Replace or remove the delegate.
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn TabBarDelegate + Send + Sync>>) {
        self.delegate = delegate;
    }

    /// Replace the item list.
    ///
    /// Animated transitions move surviving entries from where they are drawn
    /// now to their new slots and fade new entries in. A selection that is
    /// not part of `items` is cleared.
    ///
    /// # Errors
    ///
    /// Fails without touching the bar if an item cannot be drawn or two
    /// items share an id.
    pub fn set_items(
        &mut self,
        items: Vec<TabItem>,
        transition: Transition,
    ) -> Result<(), TabBarError> {
        let mut seen = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(reason) = item.unsupported_reason() {
                log::warn!("rejected tab items: item {index} ('{}'): {reason}", item.id());
                return Err(TabBarError::UnsupportedItem {
                    index,
                    id: item.id().clone(),
                    reason,
                });
            }
            if !seen.insert(item.id()) {
                log::warn!("rejected tab items: duplicate id '{}'", item.id());
                return Err(TabBarError::DuplicateItem(item.id().clone()));
            }
        }

        let from = (!transition.is_immediate()).then(|| self.presented_frames());

        self.icons = items
            .iter()
            .map(|item| IconSet::render(item, &self.style))
            .collect();
        self.items = items;
        if let Some(id) = &self.selected {
            if !self.items.iter().any(|item| item.id() == id) {
                log::debug!("selected item '{id}' removed, clearing selection");
                self.selected = None;
            }
        }
        self.pressed = None;
        self.relayout();

        self.transition = from.map(|from| {
            log::debug!(
                "animating {} tab entries over {:?}",
                self.layout.entries.len(),
                transition.duration()
            );
            ItemTransition {
                from,
                tween: Tween::new(transition.duration()).with_easing(self.style.animation_easing),
            }
        });
        Ok(())
    }

    /// Install or remove the overflow item.
    ///
    /// # Errors
    ///
    /// Fails without touching the bar if the item cannot be drawn.
    pub fn set_more_item(&mut self, item: Option<TabItem>) -> Result<(), TabBarError> {
        if let Some(item) = &item {
            if let Some(reason) = item.unsupported_reason() {
                log::warn!("rejected more item '{}': {reason}", item.id());
                return Err(TabBarError::UnsupportedMoreItem {
                    id: item.id().clone(),
                    reason,
                });
            }
        }
        self.more_icons = item
            .as_ref()
            .and_then(|item| IconSet::render(item, &self.style));
        if item.is_none() {
            self.more_highlighted = false;
        }
        self.more_item = item;
        self.pressed = None;
        self.relayout();
        Ok(())
    }

    /// Spacing around every item. Negative values clamp to zero.
    pub fn set_item_spacing(&mut self, spacing: f32) {
        self.style.item_spacing = clamp_spacing(spacing);
        self.relayout();
    }

    /// Row cap applied while an overflow item is installed. At least one.
    pub fn set_max_rows(&mut self, max_rows: usize) {
        self.style.max_rows = max_rows.max(1);
        self.relayout();
    }

    /// Image drawn behind the selected entry instead of the flat fill.
    pub fn set_selected_background_image(&mut self, image: Option<Arc<Image>>) {
        self.selected_background_image = image;
    }

    /// Show the more entry as active without changing the selection.
    pub fn highlight_more_item(&mut self, highlight: bool) {
        if self.more_item.is_none() {
            return;
        }
        log::trace!("more item highlight: {highlight}");
        self.more_highlighted = highlight;
    }

    /// Select an item programmatically, or clear the selection.
    ///
    /// The delegate is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`TabBarError::UnknownItem`] if no item has this id.
    pub fn set_selected_item(&mut self, id: Option<&ItemId>) -> Result<(), TabBarError> {
        match id {
            None => self.selected = None,
            Some(id) if self.index_of(id).is_some() => self.selected = Some(id.clone()),
            Some(id) => {
                log::warn!("cannot select unknown tab item '{id}'");
                return Err(TabBarError::UnknownItem(id.clone()));
            }
        }
        Ok(())
    }

    // ===== Accessors =====

    /// All items, in order.
    #[must_use]
    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    /// The overflow item.
    #[must_use]
    pub const fn more_item(&self) -> Option<&TabItem> {
        self.more_item.as_ref()
    }

    /// The selected item.
    #[must_use]
    pub fn selected_item(&self) -> Option<&TabItem> {
        self.selected_index().map(|i| &self.items[i])
    }

    /// Id of the selected item.
    #[must_use]
    pub const fn selected_item_id(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    /// Index of the selected item in [`Self::items`].
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.as_ref().and_then(|id| self.index_of(id))
    }

    /// Index of the item with this id.
    #[must_use]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Rows in use.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.layout.rows
    }

    /// Height of one row.
    #[must_use]
    pub const fn row_height(&self) -> f32 {
        self.layout.row_height
    }

    /// Left inset of the slot grid.
    #[must_use]
    pub const fn padding(&self) -> f32 {
        self.layout.padding
    }

    /// Spacing around every item.
    #[must_use]
    pub const fn item_spacing(&self) -> f32 {
        self.style.item_spacing
    }

    /// Row cap applied while an overflow item is installed.
    #[must_use]
    pub const fn max_rows(&self) -> usize {
        self.style.max_rows
    }

    /// Height of all rows.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.layout.height()
    }

    /// The current layout.
    #[must_use]
    pub const fn tab_layout(&self) -> &TabLayout {
        &self.layout
    }

    /// Entries in slot order.
    #[must_use]
    pub fn displayed_entries(&self) -> &[DisplayEntry] {
        &self.layout.entries
    }

    /// Items hidden behind the more entry.
    #[must_use]
    pub fn folded_items(&self) -> &[TabItem] {
        self.items.get(self.layout.folded.clone()).unwrap_or(&[])
    }

    /// Item shown in `slot`, or the more item for the more entry.
    #[must_use]
    pub fn entry_item(&self, slot: usize) -> Option<&TabItem> {
        match self.layout.entries.get(slot)? {
            DisplayEntry::Item(index) => self.items.get(*index),
            DisplayEntry::More => self.more_item.as_ref(),
        }
    }

    /// Final frame of `slot`, ignoring any running animation.
    #[must_use]
    pub fn entry_frame(&self, slot: usize) -> Option<Rect> {
        self.layout.slot_frame(slot, self.bounds.origin())
    }

    /// Slot under `point`.
    #[must_use]
    pub fn entry_at(&self, point: Point) -> Option<usize> {
        self.layout.slot_at(self.bounds.origin(), point)
    }

    /// Whether the selected item is folded, so the more entry stands in for it.
    #[must_use]
    pub fn is_more_selected(&self) -> bool {
        self.selected_index()
            .is_some_and(|i| self.layout.folded.contains(&i))
    }

    /// Whether the more entry was highlighted through [`Self::highlight_more_item`].
    #[must_use]
    pub const fn is_more_highlighted(&self) -> bool {
        self.more_highlighted
    }

    /// Whether `slot` paints with the selected background.
    #[must_use]
    pub fn is_entry_selected(&self, slot: usize) -> bool {
        match self.layout.entries.get(slot) {
            Some(DisplayEntry::Item(index)) => {
                self.selected.as_ref() == self.items.get(*index).map(TabItem::id)
            }
            Some(DisplayEntry::More) => self.more_highlighted || self.is_more_selected(),
            None => false,
        }
    }

    /// Whether `slot` paints with the highlighted icon and title.
    #[must_use]
    pub fn is_entry_highlighted(&self, slot: usize) -> bool {
        self.pressed
            .is_some_and(|press| press.slot == slot && press.inside)
            || self.is_entry_selected(slot)
    }

    // ===== Animation =====

    /// Advance a running item transition.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(transition) = &mut self.transition {
            transition.tween.advance(dt);
            if transition.tween.is_complete() {
                self.transition = None;
            }
        }
    }

    /// Whether an item transition is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Frame `slot` is drawn at right now.
    #[must_use]
    pub fn presented_frame(&self, slot: usize) -> Option<Rect> {
        let target = self.entry_frame(slot)?;
        let Some(transition) = &self.transition else {
            return Some(target);
        };
        let key = self.entry_key(slot)?;
        Some(transition.from.get(&key).map_or(target, |from| {
            Rect::interpolate(from, &target, transition.tween.value())
        }))
    }

    /// Opacity `slot` is drawn with right now.
    #[must_use]
    pub fn entry_opacity(&self, slot: usize) -> f32 {
        match (&self.transition, self.entry_key(slot)) {
            (Some(transition), Some(key)) if !transition.from.contains_key(&key) => {
                transition.tween.value()
            }
            _ => 1.0,
        }
    }

    fn entry_key(&self, slot: usize) -> Option<EntryKey> {
        match self.layout.entries.get(slot)? {
            DisplayEntry::Item(index) => Some(EntryKey::Item(self.items.get(*index)?.id().clone())),
            DisplayEntry::More => Some(EntryKey::More),
        }
    }

    fn presented_frames(&self) -> HashMap<EntryKey, Rect> {
        (0..self.layout.entries.len())
            .filter_map(|slot| Some((self.entry_key(slot)?, self.presented_frame(slot)?)))
            .collect()
    }

    // ===== Input =====

    /// Feed an input event through the press state machine.
    ///
    /// A press highlights the entry under it; releasing inside the same entry
    /// commits. Regular items need the delegate's approval. Only the pointer
    /// that started a press can move, end or cancel it.
    pub fn handle_event(
        &mut self,
        event: &Event,
        delegate: &mut dyn TabBarDelegate,
    ) -> Option<TabBarMessage> {
        let (pointer, phase) = event.press_phase()?;
        if self.pressed.is_some_and(|press| press.pointer != pointer) {
            log::trace!("ignoring {pointer:?} during another press");
            return None;
        }
        match phase {
            PressPhase::Began(position) => {
                let slot = self.entry_at(position);
                self.pressed = slot.map(|slot| {
                    log::trace!("press began on slot {slot}");
                    Press {
                        slot,
                        inside: true,
                        pointer,
                    }
                });
                None
            }
            PressPhase::Moved(position) => {
                if let Some(slot) = self.pressed.map(|press| press.slot) {
                    let inside = self.entry_at(position) == Some(slot);
                    if let Some(press) = &mut self.pressed {
                        press.inside = inside;
                    }
                }
                None
            }
            PressPhase::Ended(position) => {
                let press = self.pressed.take()?;
                if self.entry_at(position) != Some(press.slot) {
                    log::trace!("press on slot {} released outside", press.slot);
                    return None;
                }
                self.commit(press.slot, delegate)
            }
            PressPhase::Cancelled => {
                if self.pressed.take().is_some() {
                    log::trace!("press cancelled");
                }
                None
            }
        }
    }

    fn commit(&mut self, slot: usize, delegate: &mut dyn TabBarDelegate) -> Option<TabBarMessage> {
        match *self.layout.entries.get(slot)? {
            DisplayEntry::More => {
                let folded = self.folded_items().to_vec();
                log::debug!("more tapped with {} folded items", folded.len());
                delegate.did_tap_more(self, &folded);
                Some(TabBarMessage::MoreTapped {
                    folded: folded.iter().map(|item| item.id().clone()).collect(),
                })
            }
            DisplayEntry::Item(index) => {
                let item = self.items.get(index)?.clone();
                if !delegate.should_select_item(self, &item) {
                    log::debug!("selection of '{}' declined", item.id());
                    return None;
                }
                self.selected = Some(item.id().clone());
                delegate.did_select_item(self, &item);
                Some(TabBarMessage::ItemSelected {
                    id: item.id().clone(),
                    index,
                })
            }
        }
    }

    // ===== Layout & Paint =====

    fn params(&self, available_width: f32) -> LayoutParams {
        LayoutParams {
            available_width,
            item_spacing: self.style.item_spacing,
            max_rows: self.style.max_rows,
        }
    }

    fn relayout(&mut self) {
        self.layout = compute_layout(
            &self.items,
            self.more_item.as_ref(),
            &self.style.metrics(),
            &self.params(self.bounds.width),
        );
        if self
            .pressed
            .is_some_and(|press| press.slot >= self.layout.entries.len())
        {
            self.pressed = None;
        }
        log::debug!(
            "tab bar layout: {} items in {} rows of {}, {} folded",
            self.items.len(),
            self.layout.rows,
            self.layout.per_row,
            self.layout.folded.len()
        );
    }

    fn paint_entry(&self, canvas: &mut dyn Canvas, slot: usize, frame: Rect) {
        let Some(item) = self.entry_item(slot) else {
            return;
        };
        let icons = match self.layout.entries[slot] {
            DisplayEntry::Item(index) => self.icons.get(index).and_then(Option::as_ref),
            DisplayEntry::More => self.more_icons.as_ref(),
        };
        let selected = self.is_entry_selected(slot);
        let highlighted = self.is_entry_highlighted(slot);

        if selected {
            match &self.selected_background_image {
                Some(image) => canvas.draw_image(image, frame),
                None => canvas.fill_rect(frame, self.style.selected_background),
            }
        }

        let metrics = self.style.metrics();
        let content = frame.centered(metrics.content_size(item));
        let center_x = frame.center().x;
        let mut y = content.y;

        if let Some(icons) = icons {
            let size = self.style.icon_size;
            let icon_rect = Rect::new(center_x - size.width / 2.0, y, size.width, size.height);
            let image = if highlighted {
                &icons.highlighted
            } else {
                &icons.normal
            };
            canvas.draw_image(image, icon_rect);
            y += size.height;
        }

        if let Some(title) = item.title().filter(|t| !t.is_empty()) {
            let style = TextStyle {
                size: self.style.title_font_size,
                color: if highlighted {
                    self.style.selected_title_color
                } else {
                    self.style.title_color
                },
                weight: if selected {
                    FontWeight::Semibold
                } else {
                    FontWeight::Normal
                },
            };
            let x = center_x - metrics.title_width(title) / 2.0;
            canvas.draw_text(title, Point::new(x, y + self.style.title_line_height), &style);
        }

        if let Some(badge) = item.badge_value().filter(|b| !b.is_empty()) {
            self.paint_badge(canvas, badge, content);
        }
    }

    // Pill centred on the top-right corner of the content.
    fn paint_badge(&self, canvas: &mut dyn Canvas, badge: &str, content: Rect) {
        let metrics = self.style.metrics();
        let height = self.style.title_line_height;
        let width = (metrics.title_width(badge) + height / 2.0).max(height);
        let pill = Rect::new(
            content.right() - width / 2.0,
            content.y - height / 2.0,
            width,
            height,
        );
        canvas.fill_rect(pill, self.style.badge_color);
        let style = TextStyle {
            size: self.style.title_font_size,
            color: Color::WHITE,
            weight: FontWeight::Bold,
        };
        let x = pill.center().x - metrics.title_width(badge) / 2.0;
        canvas.draw_text(badge, Point::new(x, pill.bottom()), &style);
    }
}

fn clamp_spacing(spacing: f32) -> f32 {
    if spacing.is_finite() {
        spacing.max(0.0)
    } else {
        0.0
    }
}

impl Widget for TabBar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = constraints.widest();
        let layout = compute_layout(
            &self.items,
            self.more_item.as_ref(),
            &self.style.metrics(),
            &self.params(width),
        );
        constraints.constrain(Size::new(width, layout.height()))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.relayout();
        LayoutResult {
            size: Size::new(bounds.width, self.layout.height()),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.layout.entries.is_empty() {
            return;
        }
        let bar = Rect::new(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.layout.height(),
        );
        canvas.fill_rect(bar, self.style.background);
        canvas.push_clip(bar);
        for slot in 0..self.layout.entries.len() {
            let Some(frame) = self.presented_frame(slot) else {
                continue;
            };
            let opacity = self.entry_opacity(slot);
            if opacity < 1.0 {
                canvas.push_opacity(opacity);
                self.paint_entry(canvas, slot, frame);
                canvas.pop_opacity();
            } else {
                self.paint_entry(canvas, slot, frame);
            }
        }
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let message = match self.delegate.take() {
            Some(mut delegate) => {
                let message = self.handle_event(event, &mut *delegate);
                self.delegate = Some(delegate);
                message
            }
            None => self.handle_event(event, &mut AutoApprove),
        };
        message.map(|m| Box::new(m) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        !self.items.is_empty()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TabList
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{SystemItem, UnsupportedReason};
    use std::sync::Mutex;
    use tabstrip_core::{DrawCommand, MouseButton, RecordingCanvas, TouchId};

    // 10-glyph titles at 6.0 plus 10 spacing each side → 80 wide, 32 tall slots.
    fn style() -> TabBarStyle {
        TabBarStyle {
            item_spacing: 10.0,
            ..TabBarStyle::default()
        }
    }

    fn items(n: usize) -> Vec<TabItem> {
        (0..n)
            .map(|i| TabItem::new(format!("item-{i}"), format!("Title {i:04}")))
            .collect()
    }

    fn id(i: usize) -> ItemId {
        ItemId::new(format!("item-{i}"))
    }

    fn bar(n: usize) -> TabBar {
        let mut bar = TabBar::new().with_style(style());
        bar.set_items(items(n), Transition::Immediate).unwrap();
        bar.layout(Rect::new(0.0, 0.0, 320.0, 200.0));
        bar
    }

    fn bar_with_more(n: usize) -> TabBar {
        let mut bar = bar(n);
        bar.set_more_item(Some(TabItem::new("more", "More"))).unwrap();
        bar
    }

    fn centre(bar: &TabBar, slot: usize) -> Point {
        bar.entry_frame(slot).unwrap().center()
    }

    fn down(p: Point) -> Event {
        Event::MouseDown {
            position: p,
            button: MouseButton::Left,
        }
    }

    fn up(p: Point) -> Event {
        Event::MouseUp {
            position: p,
            button: MouseButton::Left,
        }
    }

    fn tap(bar: &mut TabBar, delegate: &mut dyn TabBarDelegate, p: Point) -> Option<TabBarMessage> {
        bar.handle_event(&down(p), delegate);
        bar.handle_event(&up(p), delegate)
    }

    #[derive(Default)]
    struct Recorder {
        decline: bool,
        asked: Vec<ItemId>,
        selected: Vec<ItemId>,
        more: Vec<Vec<ItemId>>,
    }

    impl TabBarDelegate for Recorder {
        fn should_select_item(&mut self, _bar: &TabBar, item: &TabItem) -> bool {
            self.asked.push(item.id().clone());
            !self.decline
        }

        fn did_select_item(&mut self, bar: &TabBar, item: &TabItem) {
            assert_eq!(bar.selected_item_id(), Some(item.id()));
            self.selected.push(item.id().clone());
        }

        fn did_tap_more(&mut self, _bar: &TabBar, folded: &[TabItem]) {
            self.more.push(folded.iter().map(|i| i.id().clone()).collect());
        }
    }

    // ===== Construction Tests =====

    #[test]
    fn test_tab_bar_new_is_empty() {
        let bar = TabBar::new();
        assert!(bar.items().is_empty());
        assert_eq!(bar.rows(), 0);
        assert!(bar.selected_item().is_none());
        assert!(!bar.is_interactive());
    }

    #[test]
    fn test_tab_bar_builders() {
        let bar = TabBar::new().accessible_name("Sections").test_id("tabs");
        assert_eq!(Widget::accessible_name(&bar), Some("Sections"));
        assert_eq!(Widget::test_id(&bar), Some("tabs"));
        assert_eq!(bar.accessible_role(), AccessibleRole::TabList);
    }

    // ===== set_items Tests =====

    #[test]
    fn test_set_items_lays_out() {
        let bar = bar(3);
        assert_eq!(bar.items().len(), 3);
        assert_eq!(bar.rows(), 1);
        assert_eq!(bar.row_height(), 32.0);
        assert_eq!(bar.padding(), 0.0);
    }

    #[test]
    fn test_set_items_rejects_system_item_without_change() {
        let mut bar = bar(2);
        let mut list = items(3);
        list[1] = TabItem::system("search", SystemItem::Search);
        let err = bar.set_items(list, Transition::Immediate).unwrap_err();
        assert_eq!(
            err,
            TabBarError::UnsupportedItem {
                index: 1,
                id: ItemId::new("search"),
                reason: UnsupportedReason::SystemItem(SystemItem::Search),
            }
        );
        assert_eq!(bar.items().len(), 2);
    }

    #[test]
    fn test_set_items_rejects_duplicate_ids() {
        let mut bar = bar(1);
        let list = vec![TabItem::new("a", "A"), TabItem::new("a", "Again")];
        assert_eq!(
            bar.set_items(list, Transition::Immediate),
            Err(TabBarError::DuplicateItem(ItemId::new("a")))
        );
        assert_eq!(bar.items().len(), 1);
    }

    #[test]
    fn test_set_items_clears_missing_selection() {
        let mut bar = bar(4);
        bar.set_selected_item(Some(&id(3))).unwrap();
        bar.set_items(items(2), Transition::Immediate).unwrap();
        assert_eq!(bar.selected_item_id(), None);
    }

    #[test]
    fn test_set_items_keeps_surviving_selection() {
        let mut bar = bar(4);
        bar.set_selected_item(Some(&id(1))).unwrap();
        bar.set_items(items(2), Transition::Immediate).unwrap();
        assert_eq!(bar.selected_item_id(), Some(&id(1)));
    }

    // ===== Configuration Tests =====

    #[test]
    fn test_set_item_spacing_clamps() {
        let mut bar = bar(2);
        bar.set_item_spacing(-5.0);
        assert_eq!(bar.item_spacing(), 0.0);
        bar.set_item_spacing(f32::NAN);
        assert_eq!(bar.item_spacing(), 0.0);
    }

    #[test]
    fn test_set_item_spacing_relayouts() {
        let mut bar = bar(5);
        assert_eq!(bar.rows(), 2);
        // 60 wide slots: five fit in 320
        bar.set_item_spacing(0.0);
        assert_eq!(bar.rows(), 1);
        assert_eq!(bar.row_height(), 12.0);
    }

    #[test]
    fn test_set_max_rows_at_least_one() {
        let mut bar = bar(2);
        bar.set_max_rows(0);
        assert_eq!(bar.max_rows(), 1);
    }

    #[test]
    fn test_set_more_item_rejects_system_item() {
        let mut bar = bar(2);
        let err = bar
            .set_more_item(Some(TabItem::system("more", SystemItem::More)))
            .unwrap_err();
        assert!(matches!(err, TabBarError::UnsupportedMoreItem { .. }));
        assert!(bar.more_item().is_none());
    }

    #[test]
    fn test_highlight_more_item_requires_more_item() {
        let mut bar = bar(2);
        bar.highlight_more_item(true);
        assert!(!bar.is_more_highlighted());
        bar.set_more_item(Some(TabItem::new("more", "More"))).unwrap();
        bar.highlight_more_item(true);
        assert!(bar.is_more_highlighted());
        assert_eq!(bar.selected_item_id(), None);
        bar.set_more_item(None).unwrap();
        assert!(!bar.is_more_highlighted());
    }

    // ===== Overflow Tests =====

    #[test]
    fn test_overflow_folds_trailing_items() {
        let bar = bar_with_more(9);
        assert_eq!(bar.rows(), 2);
        assert_eq!(bar.displayed_entries().len(), 8);
        assert_eq!(bar.displayed_entries()[7], DisplayEntry::More);
        let folded: Vec<_> = bar.folded_items().iter().map(|i| i.id().clone()).collect();
        assert_eq!(folded, vec![id(7), id(8)]);
    }

    #[test]
    fn test_removing_more_item_unfolds() {
        let mut bar = bar_with_more(9);
        bar.set_more_item(None).unwrap();
        assert_eq!(bar.rows(), 3);
        assert!(bar.folded_items().is_empty());
    }

    #[test]
    fn test_folded_selection_selects_more_entry() {
        let mut bar = bar_with_more(9);
        bar.set_selected_item(Some(&id(8))).unwrap();
        assert!(bar.is_more_selected());
        assert!(bar.is_entry_selected(7));
        assert!(!bar.is_entry_selected(0));
    }

    // ===== Selection Tests =====

    #[test]
    fn test_set_selected_item_unknown_fails() {
        let mut bar = bar(3);
        bar.set_selected_item(Some(&id(0))).unwrap();
        let err = bar.set_selected_item(Some(&ItemId::new("nope"))).unwrap_err();
        assert_eq!(err, TabBarError::UnknownItem(ItemId::new("nope")));
        assert_eq!(bar.selected_item_id(), Some(&id(0)));
    }

    #[test]
    fn test_set_selected_item_none_clears() {
        let mut bar = bar(3);
        bar.set_selected_item(Some(&id(2))).unwrap();
        assert_eq!(bar.selected_index(), Some(2));
        bar.set_selected_item(None).unwrap();
        assert!(bar.selected_item().is_none());
    }

    #[test]
    fn test_tap_selects_item() {
        let mut bar = bar(3);
        let mut delegate = Recorder::default();
        let p = centre(&bar, 1);
        let msg = tap(&mut bar, &mut delegate, p);
        assert_eq!(
            msg,
            Some(TabBarMessage::ItemSelected { id: id(1), index: 1 })
        );
        assert_eq!(bar.selected_item_id(), Some(&id(1)));
        assert_eq!(delegate.asked, vec![id(1)]);
        assert_eq!(delegate.selected, vec![id(1)]);
    }

    #[test]
    fn test_declined_tap_keeps_selection() {
        let mut bar = bar(3);
        bar.set_selected_item(Some(&id(0))).unwrap();
        let mut delegate = Recorder {
            decline: true,
            ..Recorder::default()
        };
        let p = centre(&bar, 2);
        assert_eq!(tap(&mut bar, &mut delegate, p), None);
        assert_eq!(bar.selected_item_id(), Some(&id(0)));
        assert_eq!(delegate.asked, vec![id(2)]);
        assert!(delegate.selected.is_empty());
        assert!(!bar.is_entry_highlighted(2));
    }

    #[test]
    fn test_press_highlights_until_release() {
        let mut bar = bar(3);
        let mut delegate = Recorder::default();
        let p = centre(&bar, 2);
        bar.handle_event(&down(p), &mut delegate);
        assert!(bar.is_entry_highlighted(2));
        assert!(!bar.is_entry_selected(2));
        bar.handle_event(&up(p), &mut delegate);
        assert!(bar.is_entry_selected(2));
    }

    #[test]
    fn test_release_outside_does_not_select() {
        let mut bar = bar(3);
        let mut delegate = Recorder::default();
        bar.handle_event(&down(centre(&bar, 0)), &mut delegate);
        let msg = bar.handle_event(&up(centre(&bar, 1)), &mut delegate);
        assert_eq!(msg, None);
        assert!(delegate.asked.is_empty());
        assert!(bar.selected_item().is_none());
    }

    #[test]
    fn test_touch_drag_out_clears_highlight() {
        let mut bar = bar(3);
        let mut delegate = Recorder::default();
        let touch = TouchId(1);
        bar.handle_event(
            &Event::TouchStart {
                id: touch,
                position: centre(&bar, 0),
            },
            &mut delegate,
        );
        assert!(bar.is_entry_highlighted(0));
        bar.handle_event(
            &Event::TouchMove {
                id: touch,
                position: centre(&bar, 1),
            },
            &mut delegate,
        );
        assert!(!bar.is_entry_highlighted(0));
        bar.handle_event(
            &Event::TouchMove {
                id: touch,
                position: centre(&bar, 0),
            },
            &mut delegate,
        );
        assert!(bar.is_entry_highlighted(0));
    }

    #[test]
    fn test_mouse_drag_out_clears_highlight() {
        let mut bar = bar(3);
        let mut delegate = Recorder::default();
        bar.handle_event(&down(centre(&bar, 0)), &mut delegate);
        bar.handle_event(
            &Event::MouseMove {
                position: centre(&bar, 1),
            },
            &mut delegate,
        );
        assert!(!bar.is_entry_highlighted(0));
        assert!(!bar.is_entry_highlighted(1));
        bar.handle_event(
            &Event::MouseMove {
                position: centre(&bar, 0),
            },
            &mut delegate,
        );
        assert!(bar.is_entry_highlighted(0));
    }

    #[test]
    fn test_hover_without_press_highlights_nothing() {
        let mut bar = bar(3);
        let msg = bar.handle_event(
            &Event::MouseMove {
                position: centre(&bar, 1),
            },
            &mut AutoApprove,
        );
        assert_eq!(msg, None);
        assert!((0..3).all(|slot| !bar.is_entry_highlighted(slot)));
    }

    #[test]
    fn test_second_finger_does_not_steal_press() {
        let mut bar = bar(3);
        let mut delegate = Recorder::default();
        let first = TouchId(1);
        let second = TouchId(2);
        bar.handle_event(
            &Event::TouchStart {
                id: first,
                position: centre(&bar, 0),
            },
            &mut delegate,
        );
        bar.handle_event(
            &Event::TouchStart {
                id: second,
                position: centre(&bar, 2),
            },
            &mut delegate,
        );
        assert!(bar.is_entry_highlighted(0));
        assert!(!bar.is_entry_highlighted(2));

        let msg = bar.handle_event(
            &Event::TouchEnd {
                id: second,
                position: centre(&bar, 2),
            },
            &mut delegate,
        );
        assert_eq!(msg, None);
        bar.handle_event(&Event::TouchCancel { id: second }, &mut delegate);
        assert!(bar.is_entry_highlighted(0));

        let msg = bar.handle_event(
            &Event::TouchEnd {
                id: first,
                position: centre(&bar, 0),
            },
            &mut delegate,
        );
        assert_eq!(
            msg,
            Some(TabBarMessage::ItemSelected {
                id: id(0),
                index: 0
            })
        );
        assert_eq!(delegate.asked, vec![id(0)]);
    }

    #[test]
    fn test_cancel_reverts_highlight() {
        let mut bar = bar(3);
        let mut delegate = Recorder::default();
        bar.handle_event(&down(centre(&bar, 1)), &mut delegate);
        bar.handle_event(&Event::MouseLeave, &mut delegate);
        assert!(!bar.is_entry_highlighted(1));
        let msg = bar.handle_event(&up(centre(&bar, 1)), &mut delegate);
        assert_eq!(msg, None);
    }

    #[test]
    fn test_right_click_ignored() {
        let mut bar = bar(3);
        let p = centre(&bar, 0);
        let msg = bar.handle_event(
            &Event::MouseDown {
                position: p,
                button: MouseButton::Right,
            },
            &mut AutoApprove,
        );
        assert_eq!(msg, None);
        assert!(!bar.is_entry_highlighted(0));
    }

    #[test]
    fn test_tap_more_reports_folded() {
        let mut bar = bar_with_more(9);
        let mut delegate = Recorder::default();
        let p = centre(&bar, 7);
        let msg = tap(&mut bar, &mut delegate, p);
        assert_eq!(
            msg,
            Some(TabBarMessage::MoreTapped {
                folded: vec![id(7), id(8)]
            })
        );
        assert_eq!(delegate.more, vec![vec![id(7), id(8)]]);
        assert!(delegate.asked.is_empty());
        assert!(bar.selected_item().is_none());
    }

    #[test]
    fn test_widget_event_uses_stored_delegate() {
        struct Decline;
        impl TabBarDelegate for Decline {
            fn should_select_item(&mut self, _bar: &TabBar, _item: &TabItem) -> bool {
                false
            }
        }

        let mut bar = bar(3).with_delegate(Decline);
        let p = centre(&bar, 1);
        assert!(bar.event(&down(p)).is_none());
        assert!(bar.event(&up(p)).is_none());
        assert!(bar.selected_item().is_none());
    }

    #[test]
    fn test_widget_event_without_delegate_approves() {
        let mut bar = bar(3);
        let p = centre(&bar, 2);
        bar.event(&down(p));
        let msg = bar.event(&up(p)).unwrap();
        let msg = msg.downcast::<TabBarMessage>().unwrap();
        assert_eq!(*msg, TabBarMessage::ItemSelected { id: id(2), index: 2 });
    }

    #[test]
    fn test_shared_delegate_sees_selection() {
        #[derive(Clone, Default)]
        struct Shared(Arc<Mutex<Vec<ItemId>>>);
        impl TabBarDelegate for Shared {
            fn did_select_item(&mut self, _bar: &TabBar, item: &TabItem) {
                self.0.lock().unwrap().push(item.id().clone());
            }
        }

        let log = Shared::default();
        let mut bar = bar(2).with_delegate(log.clone());
        let p = centre(&bar, 0);
        bar.event(&down(p));
        bar.event(&up(p));
        assert_eq!(*log.0.lock().unwrap(), vec![id(0)]);
    }

    // ===== Widget Tests =====

    #[test]
    fn test_measure_reports_needed_height() {
        let bar = bar(5);
        let size = bar.measure(Constraints::loose(Size::new(320.0, 500.0)));
        assert_eq!(size, Size::new(320.0, 64.0));
        let wide = bar.measure(Constraints::loose(Size::new(800.0, 500.0)));
        assert_eq!(wide.height, 32.0);
    }

    #[test]
    fn test_layout_returns_bar_height() {
        let mut bar = bar(5);
        let result = bar.layout(Rect::new(0.0, 400.0, 320.0, 100.0));
        assert_eq!(result.size, Size::new(320.0, 64.0));
        assert_eq!(bar.entry_frame(0), Some(Rect::new(0.0, 400.0, 80.0, 32.0)));
    }

    #[test]
    fn test_layout_narrow_width_has_no_rows() {
        let mut bar = bar(3);
        bar.layout(Rect::new(0.0, 0.0, 40.0, 100.0));
        assert_eq!(bar.rows(), 0);
        assert_eq!(bar.entry_at(Point::new(10.0, 10.0)), None);
    }

    // ===== Paint Tests =====

    #[test]
    fn test_paint_empty_bar_draws_nothing() {
        let bar = TabBar::new();
        let mut canvas = RecordingCanvas::new();
        bar.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_paint_titles_in_slot_order() {
        let bar = bar_with_more(9);
        let mut canvas = RecordingCanvas::new();
        bar.paint(&mut canvas);
        let texts = canvas.texts();
        assert_eq!(texts.len(), 8);
        assert_eq!(texts[0], "Title 0000");
        assert_eq!(texts[7], "More");
        assert_eq!(canvas.clip_depth(), 0);
    }

    #[test]
    fn test_paint_selected_background() {
        let mut bar = bar(3);
        bar.set_selected_item(Some(&id(1))).unwrap();
        let mut canvas = RecordingCanvas::new();
        bar.paint(&mut canvas);
        let frame = bar.entry_frame(1).unwrap();
        assert!(canvas.commands().contains(&DrawCommand::FillRect {
            bounds: frame,
            color: bar.style().selected_background,
        }));
    }

    #[test]
    fn test_paint_selected_background_image() {
        let mut bar = bar(3);
        bar.set_selected_item(Some(&id(0))).unwrap();
        let image = Arc::new(Image::solid(Color::WHITE, Size::new(2.0, 2.0)).unwrap());
        bar.set_selected_background_image(Some(image));
        let mut canvas = RecordingCanvas::new();
        bar.paint(&mut canvas);
        let frame = bar.entry_frame(0).unwrap();
        assert!(canvas.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Image { bounds, source_size, .. }
                if *bounds == frame && *source_size == Size::new(2.0, 2.0)
        )));
    }

    #[test]
    fn test_paint_icons_use_tints() {
        let source = Arc::new(Image::solid(Color::rgb(1.0, 0.0, 0.0), Size::new(8.0, 8.0)).unwrap());
        let tabs = TabBarStyle {
            normal_tint: Color::rgb(0.0, 0.0, 1.0),
            selected_tint: Color::rgb(0.0, 1.0, 0.0),
            ..style()
        };
        let mut bar = TabBar::new().with_style(tabs);
        bar.set_items(
            vec![
                TabItem::with_image("a", Arc::clone(&source)),
                TabItem::with_image("b", source),
            ],
            Transition::Immediate,
        )
        .unwrap();
        bar.layout(Rect::new(0.0, 0.0, 320.0, 200.0));
        bar.set_selected_item(Some(&ItemId::new("b"))).unwrap();

        let mut canvas = RecordingCanvas::new();
        bar.paint(&mut canvas);
        let samples: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image {
                    source_size, sample, ..
                } if *source_size == Size::new(30.0, 30.0) => Some(*sample),
                _ => None,
            })
            .collect();
        assert_eq!(samples, vec![[0, 0, 255, 255], [0, 255, 0, 255]]);
    }

    #[test]
    fn test_paint_badge() {
        let mut bar = TabBar::new().with_style(style());
        bar.set_items(
            vec![TabItem::new("inbox", "Inbox").badge("3")],
            Transition::Immediate,
        )
        .unwrap();
        bar.layout(Rect::new(0.0, 0.0, 320.0, 100.0));
        let mut canvas = RecordingCanvas::new();
        bar.paint(&mut canvas);
        assert_eq!(canvas.texts(), vec!["Inbox", "3"]);
        assert!(canvas.commands().iter().any(|c| matches!(
            c,
            DrawCommand::FillRect { color, .. } if *color == bar.style().badge_color
        )));
    }

    // ===== Animation Tests =====

    #[test]
    fn test_animated_set_items_moves_entries() {
        let mut bar = bar(3);
        let old = bar.entry_frame(2).unwrap();
        let mut list = items(3);
        list.swap(0, 2);
        bar.set_items(list, Transition::millis(100)).unwrap();
        assert!(bar.is_animating());
        // item-2 now sits in slot 0 but starts where it was drawn
        assert_eq!(bar.presented_frame(0), Some(old));
        bar.advance(Duration::from_millis(50));
        let mid = bar.presented_frame(0).unwrap();
        assert!(mid.x > 0.0 && mid.x < old.x);
        bar.advance(Duration::from_millis(50));
        assert!(!bar.is_animating());
        assert_eq!(bar.presented_frame(0), bar.entry_frame(0));
    }

    #[test]
    fn test_animated_set_items_fades_in_new_entries() {
        let mut bar = bar(2);
        bar.set_items(items(3), Transition::millis(100)).unwrap();
        assert_eq!(bar.entry_opacity(0), 1.0);
        assert_eq!(bar.entry_opacity(2), 0.0);
        let mut canvas = RecordingCanvas::new();
        bar.paint(&mut canvas);
        assert!(canvas
            .commands()
            .contains(&DrawCommand::PushOpacity { alpha: 0.0 }));
        bar.advance(Duration::from_millis(100));
        assert_eq!(bar.entry_opacity(2), 1.0);
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let mut bar = bar(2);
        bar.set_items(items(3), Transition::Animated(Duration::ZERO))
            .unwrap();
        assert!(!bar.is_animating());
    }

    #[test]
    fn test_new_animation_supersedes_running_one() {
        let mut bar = bar(3);
        let mut list = items(3);
        list.swap(0, 2);
        bar.set_items(list, Transition::millis(100)).unwrap();
        bar.advance(Duration::from_millis(50));
        let mid = bar.presented_frame(0).unwrap();
        bar.set_items(items(3), Transition::millis(100)).unwrap();
        // item-2 restarts from where it was drawn mid-flight
        assert_eq!(bar.presented_frame(2), Some(mid));
    }
}
