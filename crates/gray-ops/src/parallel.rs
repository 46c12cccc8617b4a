//! Rayon-backed sweeps.
//!
//! Each worker owns a disjoint slice of the destination and reads the
//! shared source immutably, so no synchronization is needed beyond what
//! rayon's split already guarantees.

use gray_core::{Coord, Rgba8};
use rayon::prelude::*;

use crate::kernel::PixelKernel;

/// One task per row.
pub(crate) fn apply_rows<K: PixelKernel + ?Sized>(
    src: &[Rgba8],
    dst: &mut [Rgba8],
    width: u32,
    kernel: &K,
) {
    let w = width as usize;
    dst.par_chunks_mut(w)
        .zip(src.par_chunks(w))
        .enumerate()
        .for_each(|(y, (out, row))| {
            for (x, (o, &px)) in out.iter_mut().zip(row).enumerate() {
                *o = kernel.apply(px, Coord::new(x as u32, y as u32));
            }
        });
}

/// One task per pixel; rayon decides the actual split.
pub(crate) fn apply_pixels<K: PixelKernel + ?Sized>(
    src: &[Rgba8],
    dst: &mut [Rgba8],
    width: u32,
    kernel: &K,
) {
    let w = width as usize;
    dst.par_iter_mut()
        .zip(src.par_iter())
        .enumerate()
        .for_each(|(i, (o, &px))| {
            *o = kernel.apply(px, Coord::new((i % w) as u32, (i / w) as u32));
        });
}

/// Row-parallel sweep over interleaved RGBA8 bytes.
pub(crate) fn apply_rgba8_rows<K: PixelKernel + ?Sized>(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    kernel: &K,
) {
    let stride = width as usize * 4;
    dst.par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .enumerate()
        .for_each(|(y, (out, row))| {
            super::sweep::apply_rgba8_row(row, out, y as u32, kernel);
        });
}

/// Row-parallel in-place sweep over interleaved RGBA8 bytes.
pub(crate) fn apply_rgba8_rows_in_place<K: PixelKernel + ?Sized>(
    data: &mut [u8],
    width: u32,
    kernel: &K,
) {
    let stride = width as usize * 4;
    data.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            super::sweep::apply_rgba8_row_in_place(row, y as u32, kernel);
        });
}
