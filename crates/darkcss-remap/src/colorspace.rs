//! Colorspace math for previewing and matching dark colors.
//!
//! # Motivation
//!
//! A light site's colors cannot be darkened by a flat offset: a pale gray
//! border must become a dim gray, a dark body text color must become a light
//! one, and a saturated brand red must stay red. This module provides the two
//! pieces the classifier needs:
//!
//! 1. A **dark preview** of a color, computed in HSL:
//!    invert every channel, rotate the hue by 180° (which restores the
//!    original hue after the inversion flipped it), then lighten by 20% of the
//!    remaining headroom to full lightness.
//! 2. A **perceptual distance** between two colors, computed in CIE LAB, so
//!    that "nearest swatch" means nearest to the eye rather than nearest in
//!    raw RGB.
//!
//! # Distance Metric
//!
//! [`delta_e`] is the CIE76 color difference: the Euclidean distance between
//! two colors in LAB (D65 white point). It is deterministic and monotonic,
//! which is all the classifier relies on.
//!
//! # Example
//!
//! ```rust
//! use darkcss_remap::colorspace::{dark_preview, delta_e, Rgb};
//!
//! // White becomes a dark gray, black becomes white.
//! assert_eq!(dark_preview(Rgb(255, 255, 255)), Rgb(51, 51, 51));
//! assert_eq!(dark_preview(Rgb(0, 0, 0)), Rgb(255, 255, 255));
//!
//! assert_eq!(delta_e(Rgb(17, 17, 17), Rgb(17, 17, 17)), 0.0);
//! ```

// ─── RGB ────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color, as written in CSS hex or `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Inverts every channel (`255 - c`).
    pub fn negate(self) -> Self {
        Rgb(255 - self.0, 255 - self.1, 255 - self.2)
    }

    /// Converts to HSL.
    pub fn to_hsl(self) -> Hsl {
        let r = self.0 as f64 / 255.0;
        let g = self.1 as f64 / 255.0;
        let b = self.2 as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = d / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };

        Hsl { h, s, l }
    }

    /// The channels as a comma-joined triplet, e.g. `"238, 238, 238"`.
    ///
    /// This is the value format of the `--<swatch>-rgb` custom properties,
    /// which are consumed as `rgba(var(--<swatch>-rgb), <alpha>)`.
    pub fn triplet(&self) -> String {
        format!("{}, {}, {}", self.0, self.1, self.2)
    }
}

// ─── HSL ────────────────────────────────────────────────────────────────────

/// An HSL color: hue in degrees (`0.0..360.0`), saturation and lightness in
/// `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Rotates the hue by `degrees`, wrapping around the color wheel.
    pub fn rotate(self, degrees: f64) -> Self {
        Hsl {
            h: (self.h + degrees).rem_euclid(360.0),
            ..self
        }
    }

    /// Moves lightness toward full lightness by `ratio` of the remaining
    /// headroom: `l + (1 - l) * ratio`.
    pub fn lighten(self, ratio: f64) -> Self {
        Hsl {
            l: (self.l + (1.0 - self.l) * ratio).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Converts back to RGB, rounding each channel to the nearest integer.
    pub fn to_rgb(self) -> Rgb {
        let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let hp = self.h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());

        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let m = self.l - c / 2.0;
        Rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Dark preview ───────────────────────────────────────────────────────────

/// Hue rotation applied after inversion.
pub const HUE_ROTATION: f64 = 180.0;

/// Fraction of the remaining lightness headroom added to the preview.
pub const LIGHTEN_RATIO: f64 = 0.2;

/// Computes what a color should roughly look like in dark mode.
///
/// Inverts the color, rotates its hue by [`HUE_ROTATION`] and lightens it by
/// [`LIGHTEN_RATIO`] of the remaining headroom.
pub fn dark_preview(rgb: Rgb) -> Rgb {
    rgb.negate()
        .to_hsl()
        .rotate(HUE_ROTATION)
        .lighten(LIGHTEN_RATIO)
        .to_rgb()
}

// ─── Distance ───────────────────────────────────────────────────────────────

/// CIE LAB, only used to measure distances.
#[derive(Debug, Clone, Copy)]
struct Lab {
    l: f64,
    a: f64,
    b: f64,
}

/// D65 white.
const XN: f64 = 0.95047;
const YN: f64 = 1.00000;
const ZN: f64 = 1.08883;

/// Undoes the sRGB transfer curve.
fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn rgb_to_lab(rgb: Rgb) -> Lab {
    let r = srgb_to_linear(rgb.0);
    let g = srgb_to_linear(rgb.1);
    let b = srgb_to_linear(rgb.2);

    let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
    let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
    let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

    let fx = lab_f(x / XN);
    let fy = lab_f(y / YN);
    let fz = lab_f(z / ZN);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// CIE76 color difference between two colors.
pub fn delta_e(a: Rgb, b: Rgb) -> f64 {
    let a = rgb_to_lab(a);
    let b = rgb_to_lab(b);
    ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
