//! Tab items and the entries a tab bar displays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tabstrip_core::Image;

/// Stable identity of a tab item across redraws and selection changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Create an ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Stock platform tab items.
///
/// Their artwork and label belong to the platform and cannot be read back,
/// so a [`crate::TabBar`] cannot draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemItem {
    /// "More"
    More,
    /// "Favorites"
    Favorites,
    /// "Featured"
    Featured,
    /// "Top Rated"
    TopRated,
    /// "Recents"
    Recents,
    /// "Contacts"
    Contacts,
    /// "History"
    History,
    /// "Bookmarks"
    Bookmarks,
    /// "Search"
    Search,
    /// "Downloads"
    Downloads,
}

/// What an item shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemContent {
    /// Caller-supplied artwork and label.
    Custom {
        /// Icon artwork, shared and never mutated
        image: Option<Arc<Image>>,
        /// Label under the icon
        title: Option<String>,
    },
    /// Opaque platform item.
    System(SystemItem),
}

/// A selectable entry with an icon and a label.
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem {
    id: ItemId,
    content: ItemContent,
    badge: Option<String>,
}

impl TabItem {
    /// Create a titled item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: ItemContent::Custom {
                image: None,
                title: Some(title.into()),
            },
            badge: None,
        }
    }

    /// Create an icon-only item.
    #[must_use]
    pub fn with_image(id: impl Into<ItemId>, image: Arc<Image>) -> Self {
        Self {
            id: id.into(),
            content: ItemContent::Custom {
                image: Some(image),
                title: None,
            },
            badge: None,
        }
    }

    /// Wrap a stock platform item.
    #[must_use]
    pub fn system(id: impl Into<ItemId>, kind: SystemItem) -> Self {
        Self {
            id: id.into(),
            content: ItemContent::System(kind),
            badge: None,
        }
    }

    /// Set the icon. Has no effect on system items.
    #[must_use]
    pub fn image(mut self, icon: Arc<Image>) -> Self {
        if let ItemContent::Custom { image, .. } = &mut self.content {
            *image = Some(icon);
        }
        self
    }

    /// Set a badge (e.g. an unread count).
    #[must_use]
    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// Item identity.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Item content.
    #[must_use]
    pub const fn content(&self) -> &ItemContent {
        &self.content
    }

    /// Label, if readable.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match &self.content {
            ItemContent::Custom { title, .. } => title.as_deref(),
            ItemContent::System(_) => None,
        }
    }

    /// Icon artwork, if readable.
    #[must_use]
    pub const fn icon(&self) -> Option<&Arc<Image>> {
        match &self.content {
            ItemContent::Custom { image, .. } => image.as_ref(),
            ItemContent::System(_) => None,
        }
    }

    /// Badge text.
    #[must_use]
    pub fn badge_value(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    /// Whether this wraps a stock platform item.
    #[must_use]
    pub const fn is_system(&self) -> bool {
        matches!(self.content, ItemContent::System(_))
    }

    /// Why this item cannot be drawn, if it cannot.
    pub(crate) fn unsupported_reason(&self) -> Option<UnsupportedReason> {
        match &self.content {
            ItemContent::System(kind) => Some(UnsupportedReason::SystemItem(*kind)),
            ItemContent::Custom {
                image: None,
                title: None,
            } => Some(UnsupportedReason::Blank),
            ItemContent::Custom { title: Some(t), image: None } if t.is_empty() => {
                Some(UnsupportedReason::Blank)
            }
            ItemContent::Custom { .. } => None,
        }
    }
}

/// Reason an item was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// Stock item with unreadable artwork and label
    SystemItem(SystemItem),
    /// Neither an icon nor a title
    Blank,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystemItem(kind) => {
                write!(f, "system item {kind:?} does not expose its image or title")
            }
            Self::Blank => f.write_str("item has neither an image nor a title"),
        }
    }
}

/// One slot of the displayed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayEntry {
    /// The item at this index of the bar's item list
    Item(usize),
    /// The overflow entry standing in for folded items
    More,
}
