//! Core types and traits for the tabstrip widgets.
//!
//! This crate provides foundational types used throughout tabstrip:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`], [`Pointer`] and the device-independent [`PressPhase`]
//! - Rendering: the [`Widget`] and [`Canvas`] traits, [`RecordingCanvas`]
//! - Raster helpers: [`Image`]
//! - Time: [`Transition`], [`Tween`], [`Easing`]

mod animation;
mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
mod raster;
pub mod widget;

pub use animation::{Easing, Interpolate, Transition, Tween};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use event::{Event, MouseButton, Pointer, PressPhase, TouchId};
pub use geometry::{Point, Rect, Size};
pub use raster::{Image, ImageError};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget,
};
