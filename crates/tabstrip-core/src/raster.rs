//! In-memory RGBA raster images.
//!
//! Tab icons are drawn from flat-colored variants derived from the source
//! artwork's alpha channel, so hosts never see a toolkit-imposed gradient on
//! selected icons. [`Image`] wraps an [`RgbaImage`] and adds the few raster
//! operations needed for that: solid fills, resampling, alpha masks and tints.

use crate::{Color, Size};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Errors from image construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Requested size rounds to zero pixels in some dimension.
    #[error("image size {width}x{height} has no pixels")]
    EmptySize {
        /// Requested width
        width: String,
        /// Requested height
        height: String,
    },
    /// Byte buffer does not match the dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength {
        /// Byte count implied by the dimensions
        expected: usize,
        /// Byte count supplied
        actual: usize,
    },
}

/// An RGBA image with 8 bits per channel, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    buffer: RgbaImage,
}

fn pixel_dimensions(size: Size) -> Result<(u32, u32), ImageError> {
    let w = size.width.round();
    let h = size.height.round();
    if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
        return Err(ImageError::EmptySize {
            width: size.width.to_string(),
            height: size.height.to_string(),
        });
    }
    Ok((w as u32, h as u32))
}

impl Image {
    /// Wrap raw RGBA bytes, four per pixel.
    ///
    /// # Errors
    ///
    /// Fails when a dimension is zero or the buffer length is not
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptySize {
                width: width.to_string(),
                height: height.to_string(),
            });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        RgbaImage::from_raw(width, height, bytes)
            .map(|buffer| Self { buffer })
            .ok_or(ImageError::BufferLength {
                expected,
                actual: expected,
            })
    }

    /// An image of `size` filled with a single color.
    ///
    /// # Errors
    ///
    /// Fails when `size` rounds to zero pixels.
    pub fn solid(color: Color, size: Size) -> Result<Self, ImageError> {
        let (width, height) = pixel_dimensions(size)?;
        Ok(Self {
            buffer: RgbaImage::from_pixel(width, height, Rgba(color.to_rgba8())),
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Size in layout units (one unit per pixel).
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    /// Raw pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.buffer.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// The backing buffer, for handing to a rendering backend.
    #[must_use]
    pub const fn as_rgba(&self) -> &RgbaImage {
        &self.buffer
    }

    /// A copy resampled to `size` with nearest-neighbour sampling.
    ///
    /// # Errors
    ///
    /// Fails when `size` rounds to zero pixels.
    pub fn resized(&self, size: Size) -> Result<Self, ImageError> {
        let (width, height) = pixel_dimensions(size)?;
        if (width, height) == self.buffer.dimensions() {
            return Ok(self.clone());
        }
        Ok(Self {
            buffer: imageops::resize(&self.buffer, width, height, FilterType::Nearest),
        })
    }

    /// White stencil carrying only this image's alpha channel.
    #[must_use]
    pub fn alpha_mask(&self) -> Self {
        self.map_pixels(|Rgba([_, _, _, a])| Rgba([255, 255, 255, a]))
    }

    /// Flat `color` rendering of this image's shape.
    ///
    /// Each output pixel is `color` with alpha `color.a * source alpha`.
    #[must_use]
    pub fn tinted(&self, color: Color) -> Self {
        let [r, g, b, tint_alpha] = color.to_rgba8();
        self.alpha_mask().map_pixels(|Rgba([_, _, _, a])| {
            let alpha = (u16::from(a) * u16::from(tint_alpha) + 127) / 255;
            Rgba([r, g, b, alpha as u8])
        })
    }

    fn map_pixels(&self, f: impl Fn(Rgba<u8>) -> Rgba<u8>) -> Self {
        let mut buffer = self.buffer.clone();
        for pixel in buffer.pixels_mut() {
            *pixel = f(*pixel);
        }
        Self { buffer }
    }
}
