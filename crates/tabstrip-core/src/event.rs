//! Input events for widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Mouse left widget bounds
    MouseLeave,
    /// Touch started
    TouchStart {
        /// Touch identifier
        id: TouchId,
        /// Touch position
        position: Point,
    },
    /// Touch moved
    TouchMove {
        /// Touch identifier
        id: TouchId,
        /// New position
        position: Point,
    },
    /// Touch ended
    TouchEnd {
        /// Touch identifier
        id: TouchId,
        /// Final position
        position: Point,
    },
    /// Touch cancelled (e.g., palm rejection)
    TouchCancel {
        /// Touch identifier
        id: TouchId,
    },
}

/// Touch identifier for multi-touch tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TouchId(pub u32);

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// The pointer a press is made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pointer {
    /// Primary mouse button
    Mouse,
    /// A single finger
    Touch(TouchId),
}

/// Device-independent phase of a press gesture.
///
/// Tap handling only cares about where a primary press starts, moves and
/// ends, so mouse and touch input collapse into this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressPhase {
    /// Pointer went down
    Began(Point),
    /// Pointer moved
    Moved(Point),
    /// Pointer released
    Ended(Point),
    /// Gesture aborted without a release position
    Cancelled,
}

impl Event {
    /// Map a primary-button mouse or touch event to its pointer and phase.
    ///
    /// Mouse moves report `Moved` whether or not the button is held; whoever
    /// tracks the press decides whether a move matters. Secondary mouse
    /// buttons yield `None`.
    #[must_use]
    pub const fn press_phase(&self) -> Option<(Pointer, PressPhase)> {
        let (pointer, phase) = match self {
            Self::MouseDown {
                position,
                button: MouseButton::Left,
            } => (Pointer::Mouse, PressPhase::Began(*position)),
            Self::MouseMove { position } => (Pointer::Mouse, PressPhase::Moved(*position)),
            Self::MouseUp {
                position,
                button: MouseButton::Left,
            } => (Pointer::Mouse, PressPhase::Ended(*position)),
            Self::MouseLeave => (Pointer::Mouse, PressPhase::Cancelled),
            Self::TouchStart { id, position } => (Pointer::Touch(*id), PressPhase::Began(*position)),
            Self::TouchMove { id, position } => (Pointer::Touch(*id), PressPhase::Moved(*position)),
            Self::TouchEnd { id, position } => (Pointer::Touch(*id), PressPhase::Ended(*position)),
            Self::TouchCancel { id } => (Pointer::Touch(*id), PressPhase::Cancelled),
            Self::MouseDown { .. } | Self::MouseUp { .. } => return None,
        };
        Some((pointer, phase))
    }
}
