//! Dense RGBA8 image buffer.
//!
//! [`PixelBuffer`] is the value container handed between the I/O
//! collaborator and the kernel sweep. It is row-major with no padding:
//! pixel `(x, y)` lives at index `y * width + x`.
//!
//! Input and output of a sweep are always distinct buffers. Nothing in this
//! module knows about luminance.

use crate::error::{Error, Result};
use crate::pixel::{Coord, Rgba8};

/// Number of interleaved channels in the raw byte layout.
pub const CHANNELS: usize = 4;

/// Row-major grid of [`Rgba8`] pixels with fixed width and height.
///
/// # Example
///
/// ```rust
/// use gray_core::{PixelBuffer, Rgba8};
///
/// let mut img = PixelBuffer::new(4, 2);
/// img.set_pixel(3, 1, Rgba8::WHITE);
/// assert_eq!(img.pixel(3, 1), Rgba8::WHITE);
/// assert_eq!(img.dimensions(), (4, 2));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<Rgba8>,
    width: u32,
    height: u32,
}

/// Pixel count for `width x height`, or an error when it overflows.
fn checked_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows usize"))
}

impl PixelBuffer {
    /// Creates a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::default())
    }

    /// Creates a buffer filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Self {
        Self {
            data: vec![pixel; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Creates a buffer from existing pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            data: pixels,
            width,
            height,
        })
    }

    /// Creates a buffer from interleaved `[r, g, b, a, ...]` bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelMismatch`] if the byte count is not a multiple of 4.
    /// - [`Error::InvalidDimensions`] if it does not match `width * height * 4`.
    ///
    /// ```rust
    /// use gray_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_rgba8(1, 1, &[9, 8, 7, 6]).unwrap();
    /// assert_eq!(img.pixel(0, 0).to_array(), [9, 8, 7, 6]);
    /// assert!(PixelBuffer::from_rgba8(1, 1, &[9, 8, 7]).is_err());
    /// ```
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        validate_rgba8(width, height, bytes.len())?;
        let data = bytes
            .chunks_exact(CHANNELS)
            .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the pixels as interleaved `[r, g, b, a, ...]` bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|px| px.to_array()).collect()
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.data
    }

    /// All pixels in row-major order, mutable.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its pixels.
    pub fn into_pixels(self) -> Vec<Rgba8> {
        self.data
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[Coord::new(x, y).index(self.width)]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Returns the pixel at (x, y) or [`Error::OutOfBounds`].
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<Rgba8> {
        self.get_pixel(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba8) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = Coord::new(x, y).index(self.width);
        self.data[idx] = pixel;
    }

    /// Returns row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgba8] {
        assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Iterates over all pixels with their coordinates, row by row.
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (Coord, Rgba8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| (Coord::new(x, y), self.pixel(x, y)))
        })
    }

    /// Returns `true` when every pixel has `r == g == b`.
    pub fn is_gray(&self) -> bool {
        self.data.iter().all(|px| px.is_gray())
    }

    /// Fails with [`Error::DimensionMismatch`] unless both buffers share dimensions.
    pub fn ensure_same_dimensions(&self, other: &PixelBuffer) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }
}

/// Checks that `len` bytes hold exactly `width * height` RGBA8 pixels.
///
/// Shared by every raw-slice entry point so the layout rule lives in one place.
pub fn validate_rgba8(width: u32, height: u32, len: usize) -> Result<()> {
    if len % CHANNELS != 0 {
        // Most likely RGB or gray data handed over by mistake.
        let got = (1..=CHANNELS)
            .rev()
            .find(|c| len % c == 0)
            .unwrap_or(1) as u8;
        return Err(Error::channel_mismatch(CHANNELS as u8, got));
    }
    let expected = checked_len(width, height)?
        .checked_mul(CHANNELS)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "byte count overflows usize"))?;
    if len != expected {
        return Err(Error::invalid_dimensions(
            width,
            height,
            format!("expected {} bytes, got {}", expected, len),
        ));
    }
    Ok(())
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
