//! Expandable multi-row tab bar and its page controller.
//!
//! - [`TabBar`]: lays items out row-major, grows rows as needed and folds
//!   trailing items behind a more entry once `max_rows` is reached
//! - [`TabBarController`]: pairs each item with a content widget and
//!   cross-fades between them on selection
//! - [`compute_layout`]: the pure layout engine both are built on
//! - [`TabBarStyle`]: appearance, loadable from YAML

pub mod controller;
pub mod error;
pub mod item;
pub mod layout;
pub mod style;
pub mod tab_bar;

pub use controller::{
    ControllerMessage, TabBarController, TabBarControllerDelegate, TabPage,
    DEFAULT_ANIMATION_DURATION,
};
pub use error::{ConfigError, TabBarError};
pub use item::{DisplayEntry, ItemContent, ItemId, SystemItem, TabItem, UnsupportedReason};
pub use layout::{compute_layout, slot_width, ItemMetrics, LayoutParams, TabLayout};
pub use style::TabBarStyle;
pub use tab_bar::{AutoApprove, TabBar, TabBarDelegate, TabBarMessage};
