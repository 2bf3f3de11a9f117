//! # darkcss-remap - Dark Palette Remapping for Live Stylesheets
//!
//! `darkcss-remap` turns a light site's CSS into the color rules of a dark
//! user style. It is the pipeline behind the `darkcss` tool, but has no I/O of
//! its own: every stage takes text and returns text.
//!
//! ## Pipeline
//!
//! 1. [`extract_colors`]: keep only the declarations that carry colors.
//! 2. [`substitute`]: collapse the site's accent colors into `--base-color`
//!    and replace every other color with a reference to its nearest dark
//!    [`Swatch`], accumulating the `:root` definitions in
//!    [`RootDeclarations`].
//! 3. [`cleanup`]: drop selectors that must not be restyled, strip shadows,
//!    merge and format the rules.
//! 4. [`finalize`]: join the intro, `:root` block, generated rules and
//!    hand-written sections, in [`order_sections`] order, into one stylesheet.
//!
//! Separately, [`collect_variants`] finds the selectors of a site that carry
//! a known too-dim declaration, for the per-site override files.
//!
//! ## Quick Start
//!
//! ```rust
//! use darkcss_remap::{cleanup, extract_colors, substitute, Palette};
//!
//! let palette = Palette::builtin().unwrap();
//!
//! let live = ".btn { color: #0366d6; border: 1px solid #e1e4e8; padding: 4px; }";
//! let colors = extract_colors(live);
//! let result = substitute(&colors, &palette).unwrap();
//!
//! assert_eq!(
//!     cleanup(&result.css),
//!     ".btn {\n  color: var(--base-color);\n  border-color: var(--color-gray-44);\n}\n"
//! );
//! assert!(result.root.render().starts_with(":root {\n\t--color-gray-11: #111;"));
//! ```
//!
//! ## Color Matching
//!
//! Each color is first turned into a *dark preview* (inverted, hue rotated by
//! 180°, lightened) and then matched to the swatch at the smallest CIE76
//! distance. See [`colorspace`] and [`Classifier`].

pub mod classify;
pub mod cleanup;
pub mod color;
pub mod colorspace;
mod error;
pub mod extract;
pub mod finalize;
pub mod palette;
pub mod sheet;
pub mod structure;
pub mod substitute;
pub mod variants;

pub use error::{RemapError, Result};

pub use classify::{Classification, Classifier};
pub use cleanup::{cleanup, denied_by, rewrite_declaration};
pub use color::{parse_color, scan_tokens, ParsedColor};
pub use extract::extract_colors;
pub use finalize::{finalize, force_important, render_intro, Section};
pub use palette::{Palette, Swatch, ACCENT_PROPERTY, BUILTIN_PALETTE};
pub use structure::{
    order_sections, COLORS_FILE, GENERATED_FILE, INTRO_FILE, ROOT_FILE, SECTION_PATTERNS,
};
pub use substitute::{substitute, RootDeclarations, Substitution};
pub use variants::{collect_variants, render_combined, render_site, Mapping, Variant};
