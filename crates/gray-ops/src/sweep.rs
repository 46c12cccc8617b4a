//! Full-image sweeps.
//!
//! A sweep invokes a [`PixelKernel`] exactly once per coordinate of the
//! source and writes each result into the same cell of the destination.
//! [`Sweep`] only decides how the coordinate space is partitioned; because
//! kernels are pure the output is identical for every variant.
//!
//! # Example
//!
//! ```rust
//! use gray_core::{PixelBuffer, Rgba8};
//! use gray_ops::{apply, Grayscale, Sweep};
//!
//! let src = PixelBuffer::filled(64, 32, Rgba8::new(255, 0, 0, 200));
//! let dst = apply(&src, &Grayscale::default(), Sweep::default());
//! assert_eq!(dst.dimensions(), (64, 32));
//! assert_eq!(dst.pixel(63, 31), Rgba8::gray(76, 200));
//! ```

use std::fmt;
use std::str::FromStr;

use gray_core::image::validate_rgba8;
use gray_core::{Coord, PixelBuffer, Rgba8};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::kernel::{Grayscale, PixelKernel};
use crate::{OpsError, OpsResult};

/// Partitioning of the coordinate space across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Single thread, row-major.
    Sequential,
    /// One parallel task per row.
    Rows,
    /// Parallel over individual pixels.
    Pixels,
}

impl Default for Sweep {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Self::Rows
        } else {
            Self::Sequential
        }
    }
}

impl Sweep {
    /// Name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Rows => "rows",
            Self::Pixels => "pixels",
        }
    }

    /// The variant actually executed in this build.
    ///
    /// Without the `parallel` feature every sweep runs sequentially.
    pub fn effective(self) -> Self {
        if cfg!(feature = "parallel") {
            self
        } else {
            Self::Sequential
        }
    }
}

impl FromStr for Sweep {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "seq" | "serial" => Ok(Self::Sequential),
            "rows" | "row" => Ok(Self::Rows),
            "pixels" | "pixel" => Ok(Self::Pixels),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown sweep '{}', expected sequential, rows or pixels",
                other
            ))),
        }
    }
}

impl fmt::Display for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies `kernel` to every pixel of `src`, returning a new buffer of the
/// same dimensions.
pub fn apply<K: PixelKernel + ?Sized>(src: &PixelBuffer, kernel: &K, sweep: Sweep) -> PixelBuffer {
    let mut dst = PixelBuffer::new(src.width(), src.height());
    sweep_into(src, &mut dst, kernel, sweep);
    dst
}

/// Applies `kernel` to every pixel of `src`, writing into a caller-owned `dst`.
///
/// # Errors
///
/// Returns [`OpsError::Core`] with a dimension mismatch if `dst` is not the
/// same size as `src`.
pub fn apply_into<K: PixelKernel + ?Sized>(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    kernel: &K,
    sweep: Sweep,
) -> OpsResult<()> {
    src.ensure_same_dimensions(dst)?;
    sweep_into(src, dst, kernel, sweep);
    Ok(())
}

/// Converts `src` to grayscale with the default kernel and sweep.
///
/// ```rust
/// use gray_core::{PixelBuffer, Rgba8};
///
/// let src = PixelBuffer::filled(2, 2, Rgba8::new(0, 255, 0, 128));
/// let gray = gray_ops::grayscale(&src);
/// assert!(gray.is_gray());
/// assert_eq!(gray.pixel(1, 1), Rgba8::gray(149, 128));
/// ```
pub fn grayscale(src: &PixelBuffer) -> PixelBuffer {
    apply(src, &Grayscale::default(), Sweep::default())
}

fn sweep_into<K: PixelKernel + ?Sized>(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    kernel: &K,
    sweep: Sweep,
) {
    let (width, height) = src.dimensions();
    let sweep = sweep.effective();
    debug!(width, height, sweep = %sweep, "apply kernel");
    if src.is_empty() {
        return;
    }
    let (src, dst) = (src.pixels(), dst.pixels_mut());
    match sweep {
        Sweep::Sequential => apply_sequential(src, dst, width, kernel),
        #[cfg(feature = "parallel")]
        Sweep::Rows => crate::parallel::apply_rows(src, dst, width, kernel),
        #[cfg(feature = "parallel")]
        Sweep::Pixels => crate::parallel::apply_pixels(src, dst, width, kernel),
        #[cfg(not(feature = "parallel"))]
        Sweep::Rows | Sweep::Pixels => apply_sequential(src, dst, width, kernel),
    }
}

fn apply_sequential<K: PixelKernel + ?Sized>(
    src: &[Rgba8],
    dst: &mut [Rgba8],
    width: u32,
    kernel: &K,
) {
    let w = width as usize;
    for (y, (out, row)) in dst.chunks_mut(w).zip(src.chunks(w)).enumerate() {
        for (x, (o, &px)) in out.iter_mut().zip(row).enumerate() {
            *o = kernel.apply(px, Coord::new(x as u32, y as u32));
        }
    }
}

// ============================================================================
// Raw RGBA8 slices
// ============================================================================

#[inline]
fn read_px(c: &[u8]) -> Rgba8 {
    Rgba8::new(c[0], c[1], c[2], c[3])
}

pub(crate) fn apply_rgba8_row<K: PixelKernel + ?Sized>(row: &[u8], out: &mut [u8], y: u32, kernel: &K) {
    for (x, (o, c)) in out.chunks_exact_mut(4).zip(row.chunks_exact(4)).enumerate() {
        o.copy_from_slice(&kernel.apply(read_px(c), Coord::new(x as u32, y)).to_array());
    }
}

pub(crate) fn apply_rgba8_row_in_place<K: PixelKernel + ?Sized>(row: &mut [u8], y: u32, kernel: &K) {
    for (x, c) in row.chunks_exact_mut(4).enumerate() {
        let out = kernel.apply(read_px(c), Coord::new(x as u32, y));
        c.copy_from_slice(&out.to_array());
    }
}

/// Applies `kernel` to interleaved RGBA8 bytes, returning a new byte vector.
///
/// # Errors
///
/// Returns [`OpsError::Core`] if `src` is not exactly `width * height * 4` bytes.
pub fn apply_rgba8<K: PixelKernel + ?Sized>(
    src: &[u8],
    width: u32,
    height: u32,
    kernel: &K,
    sweep: Sweep,
) -> OpsResult<Vec<u8>> {
    validate_rgba8(width, height, src.len())?;
    let sweep = sweep.effective();
    debug!(width, height, sweep = %sweep, "apply kernel to rgba8 slice");

    let mut dst = vec![0u8; src.len()];
    if width == 0 || height == 0 {
        return Ok(dst);
    }
    let stride = width as usize * 4;
    // Byte slices are always split by row; `Pixels` only differs for buffers.
    match sweep {
        #[cfg(feature = "parallel")]
        Sweep::Rows | Sweep::Pixels => crate::parallel::apply_rgba8_rows(src, &mut dst, width, kernel),
        _ => {
            for (y, (out, row)) in dst.chunks_mut(stride).zip(src.chunks(stride)).enumerate() {
                apply_rgba8_row(row, out, y as u32, kernel);
            }
        }
    }
    Ok(dst)
}

/// Applies `kernel` to interleaved RGBA8 bytes in place.
///
/// Each cell is read and then overwritten by the same worker, so no pixel is
/// ever observed after another pixel's result has been written over it.
pub fn apply_rgba8_in_place<K: PixelKernel + ?Sized>(
    data: &mut [u8],
    width: u32,
    height: u32,
    kernel: &K,
    sweep: Sweep,
) -> OpsResult<()> {
    validate_rgba8(width, height, data.len())?;
    let sweep = sweep.effective();
    trace!(width, height, sweep = %sweep, "apply kernel in place");

    if width == 0 || height == 0 {
        return Ok(());
    }
    let stride = width as usize * 4;
    match sweep {
        #[cfg(feature = "parallel")]
        Sweep::Rows | Sweep::Pixels => crate::parallel::apply_rgba8_rows_in_place(data, width, kernel),
        _ => {
            for (y, row) in data.chunks_mut(stride).enumerate() {
                apply_rgba8_row_in_place(row, y as u32, kernel);
            }
        }
    }
    Ok(())
}

/// Converts interleaved RGBA8 bytes to grayscale.
///
/// ```rust
/// use gray_ops::{grayscale_rgba8, Grayscale};
///
/// let out = grayscale_rgba8(&[255, 255, 255, 9, 0, 0, 0, 1], 2, 1, &Grayscale::default()).unwrap();
/// assert_eq!(out, vec![255, 255, 255, 9, 0, 0, 0, 1]);
///
/// // RGB data is rejected at the boundary
/// assert!(grayscale_rgba8(&[1, 2, 3], 1, 1, &Grayscale::default()).is_err());
/// ```
pub fn grayscale_rgba8(src: &[u8], width: u32, height: u32, kernel: &Grayscale) -> OpsResult<Vec<u8>> {
    apply_rgba8(src, width, height, kernel, Sweep::default())
}

/// Converts interleaved RGBA8 bytes to grayscale in place.
pub fn grayscale_rgba8_in_place(
    data: &mut [u8],
    width: u32,
    height: u32,
    kernel: &Grayscale,
) -> OpsResult<()> {
    apply_rgba8_in_place(data, width, height, kernel, Sweep::default())
}
