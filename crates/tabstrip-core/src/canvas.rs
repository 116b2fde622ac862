//! Canvas implementations for rendering.

use crate::widget::{Canvas, TextStyle};
use crate::{Color, Image, Point, Rect, Size};

/// A recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Rectangle bounds
        bounds: Rect,
        /// Fill color
        color: Color,
    },
    /// Text run
    Text {
        /// Text content
        content: String,
        /// Baseline-left position
        position: Point,
        /// Text style
        style: TextStyle,
    },
    /// Image scaled into bounds
    Image {
        /// Destination bounds
        bounds: Rect,
        /// Source image size
        source_size: Size,
        /// Top-left source pixel, enough to tell tinted variants apart
        sample: [u8; 4],
    },
    /// Begin clipping to bounds
    PushClip {
        /// Clip bounds
        bounds: Rect,
    },
    /// End the innermost clip
    PopClip,
    /// Begin an opacity layer
    PushOpacity {
        /// Alpha value (0.0 - 1.0)
        alpha: f32,
    },
    /// End the innermost opacity layer
    PopOpacity,
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Handing commands to a real backend later
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
    opacity_depth: usize,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Current clip nesting.
    #[must_use]
    pub const fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Current opacity layer nesting.
    #[must_use]
    pub const fn opacity_depth(&self) -> usize {
        self.opacity_depth
    }

    /// All text runs drawn so far, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            bounds: rect,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, image: &Image, bounds: Rect) {
        self.commands.push(DrawCommand::Image {
            bounds,
            source_size: image.size(),
            sample: image.pixel(0, 0).unwrap_or_default(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip { bounds: rect });
    }

    fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.commands.push(DrawCommand::PopClip);
        }
    }

    fn push_opacity(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        self.opacity_depth += 1;
        self.commands.push(DrawCommand::PushOpacity { alpha });
    }

    fn pop_opacity(&mut self) {
        if self.opacity_depth > 0 {
            self.opacity_depth -= 1;
            self.commands.push(DrawCommand::PopOpacity);
        }
    }
}
