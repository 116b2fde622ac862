//! Tab bar controller: pages of content switched by an expandable tab bar.
//!
//! Each [`TabPage`] pairs the item shown in the bar with the widget shown
//! above it, so the bar's items are always derived from the page list.

use crate::error::TabBarError;
use crate::item::TabItem;
use crate::style::TabBarStyle;
use crate::tab_bar::{TabBar, TabBarDelegate};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tabstrip_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Constraints, Event, Image, Point, Rect, Size, Transition, Tween, TypeId, Widget,
};

/// Default duration of the content cross-fade.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// An item in the bar and the content it reveals.
pub struct TabPage {
    /// Item shown in the tab bar
    pub item: TabItem,
    /// Content shown while the item is selected
    pub content: Box<dyn Widget>,
}

impl TabPage {
    /// Create a page.
    #[must_use]
    pub fn new(item: TabItem, content: impl Widget + 'static) -> Self {
        Self {
            item,
            content: Box::new(content),
        }
    }
}

impl fmt::Debug for TabPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabPage")
            .field("item", &self.item)
            .field("content_test_id", &self.content.test_id())
            .finish()
    }
}

/// Application hooks for page selection.
pub trait TabBarControllerDelegate {
    /// Whether the user may switch to the page at `index`.
    fn should_select_page(&mut self, _index: usize, _page: &TabPage) -> bool {
        true
    }

    /// Called after the user switched to the page at `index`.
    fn did_select_page(&mut self, _index: usize, _page: &TabPage) {}

    /// Called when the more entry is tapped, with the folded page indices.
    fn did_tap_more(&mut self, _indices: &[usize]) {}
}

/// Message emitted by a [`TabBarController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerMessage {
    /// The user switched pages.
    PageSelected {
        /// New page index
        index: usize,
    },
    /// The more entry was tapped.
    MoreTapped {
        /// Indices of the folded pages
        indices: Vec<usize>,
    },
}

#[derive(Debug, Clone)]
struct ContentFade {
    from: usize,
    tween: Tween,
}

/// Switches between pages of content with an expandable tab bar.
pub struct TabBarController {
    pages: Vec<TabPage>,
    selected_index: Option<usize>,
    tab_bar: TabBar,
    delegate: Option<Box<dyn TabBarControllerDelegate + Send + Sync>>,
    animation_duration: Duration,
    fade: Option<ContentFade>,
    bounds: Rect,
    content_bounds: Rect,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
}

impl fmt::Debug for TabBarController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabBarController")
            .field("pages", &self.pages)
            .field("selected_index", &self.selected_index)
            .field("tab_bar", &self.tab_bar)
            .field("animation_duration", &self.animation_duration)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl TabBarController {
    /// Create a controller selecting the first page, if any.
    ///
    /// # Errors
    ///
    /// Fails if a page item cannot be shown in the tab bar.
    pub fn new(pages: Vec<TabPage>) -> Result<Self, TabBarError> {
        let selected = (!pages.is_empty()).then_some(0);
        Self::with_selected_index(pages, selected)
    }

    /// Create a controller with an explicit initial selection.
    ///
    /// # Errors
    ///
    /// Fails if `selected` is out of range or a page item cannot be shown.
    pub fn with_selected_index(
        pages: Vec<TabPage>,
        selected: Option<usize>,
    ) -> Result<Self, TabBarError> {
        check_index(selected, pages.len())?;
        let mut tab_bar = TabBar::new();
        tab_bar.set_items(page_items(&pages), Transition::Immediate)?;
        let mut controller = Self {
            pages,
            selected_index: selected,
            tab_bar,
            delegate: None,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            fade: None,
            bounds: Rect::default(),
            content_bounds: Rect::default(),
            accessible_name_value: None,
            test_id_value: None,
        };
        controller.sync_bar_selection();
        Ok(controller)
    }

    /// Install a delegate.
    #[must_use]
    pub fn with_delegate(
        mut self,
        delegate: impl TabBarControllerDelegate + Send + Sync + 'static,
    ) -> Self {
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

    /// Replace or remove the delegate.
    pub fn set_delegate(
        &mut self,
        delegate: Option<Box<dyn TabBarControllerDelegate + Send + Sync>>,
    ) {
        self.delegate = delegate;
    }

    /// Replace every page and the bar items with them.
    ///
    /// The selection survives when its index is still valid and is cleared
    /// otherwise. A running cross-fade is dropped.
    ///
    /// # Errors
    ///
    /// Fails without changes if a page item cannot be shown.
    pub fn set_pages(
        &mut self,
        pages: Vec<TabPage>,
        transition: Transition,
    ) -> Result<(), TabBarError> {
        self.tab_bar.set_items(page_items(&pages), transition)?;
        self.pages = pages;
        if self.selected_index.is_some_and(|i| i >= self.pages.len()) {
            log::debug!(
                "selected page {:?} gone after update to {} pages",
                self.selected_index,
                self.pages.len()
            );
            self.selected_index = None;
        }
        self.fade = None;
        self.sync_bar_selection();
        self.relayout();
        Ok(())
    }

    /// Select a page programmatically, or clear the selection.
    ///
    /// The delegate is not consulted. Animated transitions cross-fade the
    /// content.
    ///
    /// # Errors
    ///
    /// Returns [`TabBarError::IndexOutOfRange`] for an index past the end.
    pub fn set_selected_index(
        &mut self,
        index: Option<usize>,
        transition: Transition,
    ) -> Result<(), TabBarError> {
        check_index(index, self.pages.len())?;
        self.switch_to(index, transition.duration());
        Ok(())
    }

    /// Selected page index.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Selected page.
    #[must_use]
    pub fn selected_page(&self) -> Option<&TabPage> {
        self.selected_index.and_then(|i| self.pages.get(i))
    }

    /// All pages, in bar order.
    #[must_use]
    pub fn pages(&self) -> &[TabPage] {
        &self.pages
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The managed tab bar.
    #[must_use]
    pub const fn tab_bar(&self) -> &TabBar {
        &self.tab_bar
    }

    /// Install or remove the bar's overflow item.
    ///
    /// # Errors
    ///
    /// Fails if the item cannot be shown.
    pub fn set_more_item(&mut self, item: Option<TabItem>) -> Result<(), TabBarError> {
        self.tab_bar.set_more_item(item)?;
        self.relayout();
        Ok(())
    }

    /// Show the bar's more entry as active.
    pub fn highlight_more_item(&mut self, highlight: bool) {
        self.tab_bar.highlight_more_item(highlight);
    }

    /// Restyle the bar and adopt the style's cross-fade duration.
    pub fn set_tab_bar_style(&mut self, style: TabBarStyle) {
        self.animation_duration = style.animation_duration();
        self.tab_bar.set_style(style);
        self.relayout();
    }

    /// Image drawn behind the selected bar entry.
    pub fn set_selected_background_image(&mut self, image: Option<Arc<Image>>) {
        self.tab_bar.set_selected_background_image(image);
    }

    /// Duration of the content cross-fade after a tap.
    #[must_use]
    pub const fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Set the cross-fade duration. Zero switches instantly.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    /// Area the selected content is laid out in.
    #[must_use]
    pub const fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    /// Advance the bar animation and the content cross-fade.
    pub fn advance(&mut self, dt: Duration) {
        self.tab_bar.advance(dt);
        if let Some(fade) = &mut self.fade {
            fade.tween.advance(dt);
            if fade.tween.is_complete() {
                self.fade = None;
            }
        }
    }

    /// Whether the content or the bar is animating.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.fade.is_some() || self.tab_bar.is_animating()
    }

    /// Progress of the running cross-fade, if any.
    #[must_use]
    pub fn fade_progress(&self) -> Option<f32> {
        self.fade.as_ref().map(|fade| fade.tween.value())
    }

    fn switch_to(&mut self, index: Option<usize>, duration: Duration) {
        let previous = self.selected_index;
        self.fade = match (previous, index) {
            (Some(from), Some(to)) if from != to && !duration.is_zero() => {
                log::debug!("cross-fading page {from} to {to} over {duration:?}");
                Some(ContentFade {
                    from,
                    tween: Tween::new(duration).with_easing(self.tab_bar.style().animation_easing),
                })
            }
            _ => None,
        };
        self.selected_index = index;
        self.sync_bar_selection();
    }

    fn sync_bar_selection(&mut self) {
        let id = self.selected_page().map(|page| page.item.id().clone());
        self.tab_bar
            .set_selected_item(id.as_ref())
            .expect("every page item is in the tab bar");
    }

    fn relayout(&mut self) {
        let bounds = self.bounds;
        let bar_height = self
            .tab_bar
            .measure(Constraints::new(bounds.width, bounds.width, 0.0, bounds.height))
            .height;
        let content_height = (bounds.height - bar_height).max(0.0);
        self.tab_bar.layout(Rect::new(
            bounds.x,
            bounds.y + content_height,
            bounds.width,
            bar_height,
        ));
        self.content_bounds = Rect::new(bounds.x, bounds.y, bounds.width, content_height);
        for page in &mut self.pages {
            page.content.layout(self.content_bounds);
        }
    }
}

fn check_index(index: Option<usize>, len: usize) -> Result<(), TabBarError> {
    match index {
        Some(index) if index >= len => Err(TabBarError::IndexOutOfRange { index, len }),
        _ => Ok(()),
    }
}

fn page_items(pages: &[TabPage]) -> Vec<TabItem> {
    pages.iter().map(|page| page.item.clone()).collect()
}

fn page_index(pages: &[TabPage], item: &TabItem) -> usize {
    pages
        .iter()
        .position(|page| page.item.id() == item.id())
        .expect("tab bar item has a page")
}

fn event_position(event: &Event) -> Option<Point> {
    match event {
        Event::MouseMove { position }
        | Event::MouseDown { position, .. }
        | Event::MouseUp { position, .. }
        | Event::TouchStart { position, .. }
        | Event::TouchMove { position, .. }
        | Event::TouchEnd { position, .. } => Some(*position),
        _ => None,
    }
}

// Routes bar callbacks to the controller delegate, translating items to pages.
struct Mediator<'a> {
    pages: &'a [TabPage],
    delegate: &'a mut Option<Box<dyn TabBarControllerDelegate + Send + Sync>>,
    selected: Option<usize>,
    more: Option<Vec<usize>>,
}

impl TabBarDelegate for Mediator<'_> {
    fn should_select_item(&mut self, _bar: &TabBar, item: &TabItem) -> bool {
        let index = page_index(self.pages, item);
        match self.delegate.as_mut() {
            Some(delegate) => delegate.should_select_page(index, &self.pages[index]),
            None => true,
        }
    }

    fn did_select_item(&mut self, _bar: &TabBar, item: &TabItem) {
        self.selected = Some(page_index(self.pages, item));
    }

    fn did_tap_more(&mut self, _bar: &TabBar, folded: &[TabItem]) {
        self.more = Some(folded.iter().map(|item| page_index(self.pages, item)).collect());
    }
}

impl Widget for TabBarController {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let bar = self.tab_bar.measure(constraints);
        let content = self
            .selected_page()
            .map_or(Size::ZERO, |page| page.content.measure(constraints));
        constraints.constrain(Size::new(
            bar.width.max(content.width),
            bar.height + content.height,
        ))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.relayout();
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.push_clip(self.content_bounds);
        let incoming = self.selected_page();
        let outgoing = self.fade.as_ref().and_then(|fade| {
            self.pages
                .get(fade.from)
                .map(|page| (page, fade.tween.value()))
        });
        match (outgoing, incoming) {
            (Some((from, progress)), Some(to)) => {
                canvas.push_opacity(1.0 - progress);
                from.content.paint(canvas);
                canvas.pop_opacity();
                canvas.push_opacity(progress);
                to.content.paint(canvas);
                canvas.pop_opacity();
            }
            (_, Some(page)) => page.content.paint(canvas),
            (_, None) => {}
        }
        canvas.pop_clip();
        self.tab_bar.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let (selected, more) = {
            let Self {
                tab_bar,
                pages,
                delegate,
                ..
            } = self;
            let mut mediator = Mediator {
                pages,
                delegate,
                selected: None,
                more: None,
            };
            tab_bar.handle_event(event, &mut mediator);
            (mediator.selected, mediator.more)
        };

        if let Some(index) = selected {
            self.switch_to(Some(index), self.animation_duration);
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_select_page(index, &self.pages[index]);
            }
            return Some(Box::new(ControllerMessage::PageSelected { index }));
        }
        // A declined tap may not change the bar, but keep it in step regardless.
        self.sync_bar_selection();

        if let Some(indices) = more {
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_tap_more(&indices);
            }
            return Some(Box::new(ControllerMessage::MoreTapped { indices }));
        }

        let over_bar = event_position(event)
            .is_some_and(|position| self.tab_bar.bounds().contains_point(&position));
        if over_bar {
            return None;
        }
        let index = self.selected_index?;
        self.pages.get_mut(index)?.content.event(event)
    }

    fn is_interactive(&self) -> bool {
        !self.pages.is_empty()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TabPanel
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
