//! Pixel and coordinate types.
//!
//! # Types
//!
//! - [`Rgba8`] - 4-channel pixel, 8 bits per channel, fixed R, G, B, A order
//! - [`Coord`] - `(x, y)` position of a pixel within its image
//!
//! # Memory Layout
//!
//! [`Rgba8`] is `#[repr(C)]` so a `&[Rgba8]` has the same layout as the
//! interleaved `[r, g, b, a, r, g, b, a, ...]` byte stream decoders hand out.

use std::fmt;

// ============================================================================
// BT.601 Luminance Constants
// ============================================================================

/// BT.601 luminance coefficient for red channel.
///
/// Used in the luminance formula: `Y = 0.299*R + 0.587*G + 0.114*B`
pub const BT601_LUMA_R: f32 = 0.299;

/// BT.601 luminance coefficient for green channel.
pub const BT601_LUMA_G: f32 = 0.587;

/// BT.601 luminance coefficient for blue channel.
pub const BT601_LUMA_B: f32 = 0.114;

/// BT.601 luminance coefficients as an array [R, G, B].
pub const BT601_LUMA: [f32; 3] = [BT601_LUMA_R, BT601_LUMA_G, BT601_LUMA_B];

/// Calculate BT.601 luminance from 8-bit channel values.
///
/// Channels are taken as plain numbers in `[0, 255]`, no normalization and
/// no gamma handling.
///
/// # Example
/// ```
/// use gray_core::pixel::luma_bt601;
/// let luma = luma_bt601(255, 0, 0);
/// // 255 * 0.299 = 76.245
/// assert!((luma - 76.245).abs() < 0.001);
/// ```
#[inline]
pub fn luma_bt601(r: u8, g: u8, b: u8) -> f32 {
    r as f32 * BT601_LUMA_R + g as f32 * BT601_LUMA_G + b as f32 * BT601_LUMA_B
}

/// 8-bit RGBA pixel.
///
/// A plain value: `Copy`, no ownership, no color space marker.
///
/// # Example
///
/// ```
/// use gray_core::Rgba8;
///
/// let px = Rgba8::new(255, 128, 64, 200);
/// assert_eq!(px.to_array(), [255, 128, 64, 200]);
/// assert!(!px.is_gray());
/// assert!(Rgba8::gray(90, 255).is_gray());
/// ```
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel value.
    pub r: u8,
    /// Green channel value.
    pub g: u8,
    /// Blue channel value.
    pub b: u8,
    /// Alpha channel value.
    pub a: u8,
}

impl Rgba8 {
    /// Create a new RGBA pixel.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a gray pixel with `r == g == b == v`.
    #[inline]
    pub const fn gray(v: u8, a: u8) -> Self {
        Self::new(v, v, v, a)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Get channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Returns `true` when red, green and blue are pairwise equal.
    #[inline]
    pub const fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl From<[u8; 4]> for Rgba8 {
    #[inline]
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgba8> for [u8; 4] {
    #[inline]
    fn from(px: Rgba8) -> Self {
        px.to_array()
    }
}

impl fmt::Debug for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rgba8")
            .field("r", &self.r)
            .field("g", &self.g)
            .field("b", &self.b)
            .field("a", &self.a)
            .finish()
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Position of a pixel inside a `width x height` grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Column, `0..width`.
    pub x: u32,
    /// Row, `0..height`.
    pub y: u32,
}

impl Coord {
    /// Create a coordinate.
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Row-major linear index for an image of the given width.
    #[inline]
    pub const fn index(self, width: u32) -> usize {
        self.y as usize * width as usize + self.x as usize
    }
}

impl From<(u32, u32)> for Coord {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}
