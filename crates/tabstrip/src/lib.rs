//! Tabstrip: an expandable, multi-row tab bar and the controller that
//! switches content with it.
//!
//! ```
//! use tabstrip::prelude::*;
//!
//! let mut bar = TabBar::new();
//! bar.set_items(
//!     vec![TabItem::new("inbox", "Inbox"), TabItem::new("sent", "Sent")],
//!     Transition::Immediate,
//! )
//! .unwrap();
//! bar.layout(Rect::new(0.0, 0.0, 320.0, 100.0));
//! assert_eq!(bar.rows(), 1);
//! ```

pub use tabstrip_core::*;
pub use tabstrip_widgets as widgets;

/// Everything needed to build and drive a tab bar.
pub mod prelude {
    pub use tabstrip_core::{
        Canvas, Color, Constraints, Event, Image, Point, Rect, RecordingCanvas, Size,
        Transition, Widget,
    };
    pub use tabstrip_widgets::{
        ControllerMessage, ItemId, TabBar, TabBarController, TabBarControllerDelegate,
        TabBarDelegate, TabBarError, TabBarMessage, TabBarStyle, TabItem, TabPage,
    };
}
