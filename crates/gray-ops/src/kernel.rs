//! Per-pixel kernels.
//!
//! A kernel maps one input pixel and its coordinate to one output pixel. It
//! reads nothing but its arguments and writes nothing but its return value,
//! so a sweep may call it for any coordinate, in any order, from any thread.
//!
//! # Grayscale
//!
//! [`Grayscale`] computes BT.601 luminance
//!
//! ```text
//! L = 0.299*R + 0.587*G + 0.114*B
//! ```
//!
//! narrows it to 8 bits and writes `(L, L, L, A)`. Alpha is copied unchanged
//! and the coordinate is ignored.
//!
//! Narrowing is controlled by [`Rounding`] (truncate by default) and the
//! arithmetic by [`Precision`]:
//!
//! | precision | arithmetic | matches real-number formula |
//! |-----------|------------|-----------------------------|
//! | `Exact`   | integer, per-mille weights `299/587/114` | always |
//! | `Relaxed` | `f32` multiply-add | within 1 |
//!
//! `Relaxed` reproduces single-precision rounding error: a neutral gray of
//! 37 evaluates to `36.99999` and truncates to 36.
//!
//! # Example
//!
//! ```rust
//! use gray_core::Rgba8;
//! use gray_ops::kernel::{Grayscale, Rounding};
//!
//! let green = Rgba8::new(0, 255, 0, 128);
//! assert_eq!(Grayscale::default().transform(green, 0, 0), Rgba8::gray(149, 128));
//!
//! let nearest = Grayscale::default().with_rounding(Rounding::Nearest);
//! assert_eq!(nearest.transform(green, 0, 0), Rgba8::gray(150, 128));
//! ```

use std::fmt;
use std::str::FromStr;

use gray_core::{luma_bt601, Coord, Rgba8};

use crate::{OpsError, OpsResult};

/// BT.601 weights scaled by 1000. They sum to exactly 1000.
const WEIGHT_R: u32 = 299;
const WEIGHT_G: u32 = 587;
const WEIGHT_B: u32 = 114;
const WEIGHT_SUM: u32 = WEIGHT_R + WEIGHT_G + WEIGHT_B;

/// A pure per-pixel transform.
///
/// Implementors must not depend on neighbouring pixels, call order or any
/// mutable state. `Sync` lets one kernel be shared by every sweep worker.
///
/// Plain closures implement it too:
///
/// ```rust
/// use gray_core::{Coord, Rgba8};
/// use gray_ops::PixelKernel;
///
/// let invert = |px: Rgba8, _: Coord| Rgba8::new(255 - px.r, 255 - px.g, 255 - px.b, px.a);
/// assert_eq!(invert.apply(Rgba8::BLACK, Coord::new(0, 0)), Rgba8::WHITE);
/// ```
pub trait PixelKernel: Sync {
    /// Maps one pixel at `coord` to its output value.
    fn apply(&self, pixel: Rgba8, coord: Coord) -> Rgba8;
}

impl<F> PixelKernel for F
where
    F: Fn(Rgba8, Coord) -> Rgba8 + Sync,
{
    #[inline]
    fn apply(&self, pixel: Rgba8, coord: Coord) -> Rgba8 {
        self(pixel, coord)
    }
}

/// How the luminance sum is narrowed to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Discard the fractional part (toward zero).
    #[default]
    Truncate,
    /// Round to nearest, halves up.
    Nearest,
}

/// Arithmetic used to evaluate the weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Integer arithmetic on per-mille weights. Bit-exact.
    #[default]
    Exact,
    /// Single-precision float arithmetic.
    Relaxed,
}

impl Rounding {
    /// Name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::Nearest => "nearest",
        }
    }
}

impl Precision {
    /// Name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Relaxed => "relaxed",
        }
    }
}

impl FromStr for Rounding {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" | "trunc" | "floor" => Ok(Self::Truncate),
            "nearest" | "round" => Ok(Self::Nearest),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown rounding '{}', expected truncate or nearest",
                other
            ))),
        }
    }
}

impl FromStr for Precision {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "fixed" => Ok(Self::Exact),
            "relaxed" | "f32" | "float" => Ok(Self::Relaxed),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown precision '{}', expected exact or relaxed",
                other
            ))),
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BT.601 grayscale kernel.
///
/// Stateless apart from its two policy fields, `Copy`, and safe to share
/// across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grayscale {
    /// Narrowing policy.
    pub rounding: Rounding,
    /// Arithmetic policy.
    pub precision: Precision,
}

impl Grayscale {
    /// Truncating, exact kernel.
    pub const fn new() -> Self {
        Self {
            rounding: Rounding::Truncate,
            precision: Precision::Exact,
        }
    }

    /// Returns a copy with a different narrowing policy.
    pub const fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Returns a copy with a different arithmetic policy.
    pub const fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Luminance of `(r, g, b)` narrowed to 8 bits.
    #[inline]
    pub fn luma(&self, r: u8, g: u8, b: u8) -> u8 {
        match self.precision {
            Precision::Exact => {
                let sum = WEIGHT_R * r as u32 + WEIGHT_G * g as u32 + WEIGHT_B * b as u32;
                let q = match self.rounding {
                    Rounding::Truncate => sum / WEIGHT_SUM,
                    Rounding::Nearest => (sum + WEIGHT_SUM / 2) / WEIGHT_SUM,
                };
                // sum <= 255 * WEIGHT_SUM
                q as u8
            }
            Precision::Relaxed => {
                let l = luma_bt601(r, g, b);
                // `as` saturates, so float overshoot cannot wrap.
                match self.rounding {
                    Rounding::Truncate => l as u8,
                    Rounding::Nearest => l.round() as u8,
                }
            }
        }
    }

    /// Transforms one pixel. `x` and `y` are accepted and ignored.
    #[inline]
    pub fn transform(&self, pixel: Rgba8, x: u32, y: u32) -> Rgba8 {
        self.apply(pixel, Coord::new(x, y))
    }
}

impl PixelKernel for Grayscale {
    #[inline]
    fn apply(&self, pixel: Rgba8, _coord: Coord) -> Rgba8 {
        Rgba8::gray(self.luma(pixel.r, pixel.g, pixel.b), pixel.a)
    }
}

/// Transforms one pixel with the default (truncating, exact) kernel.
///
/// ```rust
/// use gray_core::Rgba8;
/// use gray_ops::grayscale_pixel;
///
/// assert_eq!(grayscale_pixel(Rgba8::new(255, 0, 0, 255), 7, 9).r, 76);
/// ```
#[inline]
pub fn grayscale_pixel(pixel: Rgba8, x: u32, y: u32) -> Rgba8 {
    Grayscale::new().transform(pixel, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [Grayscale; 4] = [
        Grayscale::new(),
        Grayscale::new().with_rounding(Rounding::Nearest),
        Grayscale::new().with_precision(Precision::Relaxed),
        Grayscale::new()
            .with_rounding(Rounding::Nearest)
            .with_precision(Precision::Relaxed),
    ];

    /// Every 5th value per channel, both ends included.
    fn sample_channels() -> impl Iterator<Item = u8> + Clone {
        (0..=255u8).step_by(5)
    }

    fn sample_pixels() -> impl Iterator<Item = Rgba8> {
        sample_channels().flat_map(|r| {
            sample_channels().flat_map(move |g| {
                sample_channels().map(move |b| Rgba8::new(r, g, b, r ^ g ^ b))
            })
        })
    }

    #[test]
    fn test_black_stays_black() {
        for k in ALL {
            assert_eq!(k.transform(Rgba8::new(0, 0, 0, 255), 3, 4), Rgba8::new(0, 0, 0, 255));
        }
    }

    #[test]
    fn test_white_stays_white() {
        for k in ALL {
            assert_eq!(k.transform(Rgba8::WHITE, 0, 0), Rgba8::WHITE);
        }
    }

    #[test]
    fn test_pure_red() {
        for k in ALL {
            assert_eq!(k.transform(Rgba8::new(255, 0, 0, 255), 0, 0).r, 76);
        }
    }

    #[test]
    fn test_pure_green_truncate_vs_nearest() {
        let px = Rgba8::new(0, 255, 0, 128);
        for precision in [Precision::Exact, Precision::Relaxed] {
            let k = Grayscale::new().with_precision(precision);
            assert_eq!(k.transform(px, 0, 0), Rgba8::new(149, 149, 149, 128));
            let k = k.with_rounding(Rounding::Nearest);
            assert_eq!(k.transform(px, 0, 0), Rgba8::new(150, 150, 150, 128));
        }
    }

    #[test]
    fn test_pure_blue() {
        assert_eq!(grayscale_pixel(Rgba8::new(0, 0, 255, 1), 0, 0), Rgba8::gray(29, 1));
    }

    #[test]
    fn test_mixed_fraction() {
        // 100*0.299 + 150*0.587 + 200*0.114 = 140.75
        let px = Rgba8::new(100, 150, 200, 255);
        assert_eq!(Grayscale::new().transform(px, 0, 0).r, 140);
        let k = Grayscale::new().with_rounding(Rounding::Nearest);
        assert_eq!(k.transform(px, 0, 0).r, 141);
    }

    #[test]
    fn test_alpha_preserved() {
        for k in ALL {
            for a in 0..=255u8 {
                let px = Rgba8::new(a, 255 - a, a / 2, a);
                assert_eq!(k.transform(px, a as u32, 0).a, a);
            }
        }
    }

    #[test]
    fn test_output_is_gray() {
        for k in ALL {
            for px in sample_pixels() {
                assert!(k.transform(px, 0, 0).is_gray(), "{:?} with {:?}", px, k);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let k = Grayscale::new();
        for px in sample_pixels() {
            let first = k.transform(px, 5, 5);
            assert_eq!(k.transform(px, 5, 5), first);
            assert_eq!(k.transform(px, 5, 5), first);
        }
    }

    #[test]
    fn test_coordinate_independent() {
        let k = Grayscale::new();
        let px = Rgba8::new(12, 200, 77, 31);
        let expected = k.transform(px, 0, 0);
        for (x, y) in [(1, 0), (0, 1), (640, 480), (u32::MAX, u32::MAX)] {
            assert_eq!(k.transform(px, x, y), expected);
        }
    }

    #[test]
    fn test_exact_fractional_table() {
        // (r, g, b), real luma, truncated, nearest
        let cases = [
            ((100, 150, 200), 140.75, 140, 141),
            ((1, 1, 0), 0.886, 0, 1),
            ((0, 0, 5), 0.57, 0, 1),
            ((1, 0, 1), 0.413, 0, 0),
            ((2, 0, 0), 0.598, 0, 1),
            ((3, 1, 2), 1.712, 1, 2),
            ((0, 0, 255), 29.07, 29, 29),
            ((255, 0, 0), 76.245, 76, 76),
            ((0, 255, 0), 149.685, 149, 150),
        ];
        let truncate = Grayscale::new();
        let nearest = truncate.with_rounding(Rounding::Nearest);
        for ((r, g, b), real, t, n) in cases {
            assert_abs_diff_eq!(luma_bt601(r, g, b), real, epsilon = 1e-3);
            assert_eq!(truncate.luma(r, g, b), t, "truncate ({}, {}, {})", r, g, b);
            assert_eq!(nearest.luma(r, g, b), n, "nearest ({}, {}, {})", r, g, b);
        }
    }

    #[test]
    fn test_exact_matches_real_formula() {
        // Real luma is a multiple of 1/1000, so an f64 sum is never more than
        // a rounding error away and a tiny bias recovers the exact floor.
        const BIAS: f64 = 1e-9;
        let truncate = Grayscale::new();
        let nearest = truncate.with_rounding(Rounding::Nearest);
        for r in sample_channels() {
            for g in sample_channels() {
                for b in sample_channels() {
                    let real = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                    assert_eq!(truncate.luma(r, g, b) as f64, (real + BIAS).floor());
                    assert_eq!(nearest.luma(r, g, b) as f64, (real + 0.5 + BIAS).floor());
                }
            }
        }
    }

    #[test]
    fn test_exact_neutral_gray_is_identity() {
        for v in 0..=255u8 {
            assert_eq!(Grayscale::new().luma(v, v, v), v);
        }
    }

    #[test]
    fn test_relaxed_within_one_of_exact() {
        for rounding in [Rounding::Truncate, Rounding::Nearest] {
            let exact = Grayscale::new().with_rounding(rounding);
            let relaxed = exact.with_precision(Precision::Relaxed);
            for px in sample_pixels() {
                let a = exact.luma(px.r, px.g, px.b) as i32;
                let b = relaxed.luma(px.r, px.g, px.b) as i32;
                assert!((a - b).abs() <= 1, "{:?}: exact {} relaxed {}", px, a, b);
            }
        }
    }

    #[test]
    fn test_relaxed_truncation_undershoot() {
        let relaxed = Grayscale::new().with_precision(Precision::Relaxed);
        assert_eq!(relaxed.luma(37, 37, 37), 36);
        assert_eq!(Grayscale::new().luma(37, 37, 37), 37);
        let nearest = relaxed.with_rounding(Rounding::Nearest);
        assert_eq!(nearest.luma(37, 37, 37), 37);
    }

    #[test]
    fn test_closure_kernel() {
        let swap = |px: Rgba8, c: Coord| Rgba8::new(px.b, px.g, px.r, c.x as u8);
        assert_eq!(
            swap.apply(Rgba8::new(1, 2, 3, 4), Coord::new(9, 0)),
            Rgba8::new(3, 2, 1, 9)
        );
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!("truncate".parse::<Rounding>().unwrap(), Rounding::Truncate);
        assert_eq!("Nearest".parse::<Rounding>().unwrap(), Rounding::Nearest);
        assert_eq!("relaxed".parse::<Precision>().unwrap(), Precision::Relaxed);
        assert_eq!("EXACT".parse::<Precision>().unwrap(), Precision::Exact);
        assert!(matches!(
            "bankers".parse::<Rounding>(),
            Err(OpsError::InvalidParameter(_))
        ));
        assert!("f64".parse::<Precision>().is_err());
    }

    #[test]
    fn test_policy_display_roundtrip() {
        for r in [Rounding::Truncate, Rounding::Nearest] {
            assert_eq!(r.to_string().parse::<Rounding>().unwrap(), r);
        }
        for p in [Precision::Exact, Precision::Relaxed] {
            assert_eq!(p.to_string().parse::<Precision>().unwrap(), p);
        }
    }
}
