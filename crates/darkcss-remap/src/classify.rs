//! Nearest-swatch classification of color tokens.
//!
//! A token is parsed, turned into its [dark preview](crate::colorspace::dark_preview),
//! and matched against every swatch of the palette by CIE76 distance
//! ([`delta_e`]). Equidistant swatches resolve to the lexicographically first
//! swatch name, so the result never depends on palette order.

use tracing::debug;

use crate::color::parse_color;
use crate::colorspace::{dark_preview, delta_e, Rgb};
use crate::error::Result;
use crate::palette::{Palette, Swatch};

/// The outcome of classifying one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Name of the matched swatch.
    pub swatch: String,
    /// Verbatim alpha expression if the token was `rgba()`.
    pub alpha: Option<String>,
    /// The swatch channels as `"r, g, b"`, present only for alpha tokens.
    pub rgb_triplet: Option<String>,
}

impl Classification {
    /// True if the token carried an alpha channel.
    pub fn is_alpha(&self) -> bool {
        self.alpha.is_some()
    }
}

/// Matches colors against a palette's swatches.
#[derive(Debug)]
pub struct Classifier<'p> {
    /// Swatches sorted by name, which makes strict `<` comparison resolve
    /// ties to the first name.
    by_name: Vec<&'p Swatch>,
}

impl<'p> Classifier<'p> {
    /// Creates a classifier over `palette`'s swatches.
    pub fn new(palette: &'p Palette) -> Self {
        let mut by_name: Vec<&Swatch> = palette.swatches().iter().collect();
        by_name.sort_by(|a, b| a.name.cmp(&b.name));
        Self { by_name }
    }

    /// Returns the swatch nearest to `rgb`.
    pub fn nearest(&self, rgb: Rgb) -> &'p Swatch {
        let mut best = self.by_name[0];
        let mut best_distance = delta_e(rgb, best.rgb);
        for swatch in &self.by_name[1..] {
            let distance = delta_e(rgb, swatch.rgb);
            if distance < best_distance {
                best = swatch;
                best_distance = distance;
            }
        }
        best
    }

    /// Classifies a raw color token.
    ///
    /// Fails with [`RemapError::InvalidColor`](crate::RemapError::InvalidColor)
    /// if the token does not parse.
    pub fn classify(&self, token: &str) -> Result<Classification> {
        let parsed = parse_color(token)?;
        let preview = dark_preview(parsed.rgb);
        let swatch = self.nearest(preview);

        debug!(token, preview = ?preview, swatch = %swatch.name, "classified color");

        let rgb_triplet = parsed.alpha.as_ref().map(|_| swatch.rgb.triplet());
        Ok(Classification {
            swatch: swatch.name.clone(),
            alpha: parsed.alpha,
            rgb_triplet,
        })
    }
}
