//! The dark palette.
//!
//! A palette has two tables:
//!
//! - **Base** colors: literal color strings that all collapse into a single
//!   accent custom property, `--base-color`, regardless of which exact shade
//!   the site used.
//! - **Swatches**: named dark colors (`color-red-2: "#500"`) that every other
//!   color is matched against.
//!
//! The built-in palette is compiled into the binary as YAML and parsed once
//! per run with [`Palette::builtin`].
//!
//! ```rust
//! use darkcss_remap::Palette;
//!
//! let palette = Palette::from_yaml(r##"
//! base: ["#0366d6"]
//! swatches:
//!   color-gray-11: "#111"
//!   color-white: "#fff"
//! "##).unwrap();
//!
//! assert_eq!(palette.swatches().len(), 2);
//! assert_eq!(palette.swatch("color-white").unwrap().hex, "#fff");
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use crate::color::parse_color;
use crate::colorspace::Rgb;
use crate::error::{RemapError, Result};

/// The palette shipped with the crate.
pub const BUILTIN_PALETTE: &str = include_str!("palette.yaml");

/// Name of the accent custom property all base colors collapse into.
pub const ACCENT_PROPERTY: &str = "base-color";

#[derive(Debug, Deserialize)]
struct PaletteFile {
    base: Vec<String>,
    swatches: IndexMap<String, String>,
}

/// One named dark color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    /// Custom property name without the leading `--`.
    pub name: String,
    /// The hex value as written in the palette.
    pub hex: String,
    /// Parsed channels.
    pub rgb: Rgb,
}

impl Swatch {
    /// The `:root` declaration defining this swatch, e.g. `--color-red-2: #500;`.
    pub fn declaration(&self) -> String {
        format!("--{}: {};", self.name, self.hex)
    }
}

/// Base colors plus named swatches, in definition order.
#[derive(Debug, Clone)]
pub struct Palette {
    base: Vec<String>,
    swatches: Vec<Swatch>,
}

impl Palette {
    /// Parses the built-in palette.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_PALETTE)
    }

    /// Parses and validates a palette from YAML.
    ///
    /// Every swatch must be a valid hex color and every base entry a valid
    /// hex or `rgba()` color.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: PaletteFile =
            serde_yaml::from_str(yaml).map_err(|e| RemapError::palette(e.to_string()))?;

        if file.swatches.is_empty() {
            return Err(RemapError::palette("at least one swatch is required"));
        }

        for color in &file.base {
            parse_color(color)
                .map_err(|e| RemapError::palette(format!("base color: {}", e)))?;
        }

        let mut swatches = Vec::with_capacity(file.swatches.len());
        for (name, hex) in file.swatches {
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(RemapError::palette(format!(
                    "invalid swatch name '{}'",
                    name
                )));
            }
            let parsed = parse_color(&hex)
                .map_err(|e| RemapError::palette(format!("swatch '{}': {}", name, e)))?;
            if parsed.is_alpha() {
                return Err(RemapError::palette(format!(
                    "swatch '{}' must be a hex color",
                    name
                )));
            }
            swatches.push(Swatch {
                name,
                hex,
                rgb: parsed.rgb,
            });
        }

        Ok(Self {
            base: file.base,
            swatches,
        })
    }

    /// Literal colors that collapse into the accent property.
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// All swatches in definition order.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Looks up a swatch by name.
    pub fn swatch(&self, name: &str) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.name == name)
    }
}
