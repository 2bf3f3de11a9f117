//! The substitution engine.
//!
//! Rewrites literal colors in a CSS document into references to palette
//! custom properties, collecting the `:root` definitions those references
//! need along the way.
//!
//! # Stages
//!
//! 1. **Base unification**: every palette base color is replaced, as a
//!    case-insensitive literal, with `var(--base-color)`.
//! 2. **Closest color**: every remaining color token is classified and all of
//!    its occurrences are replaced with `var(--<swatch>)`, or with
//!    `rgba(var(--<swatch>-rgb), <alpha>)` when the token carried an alpha
//!    channel.
//!
//! Both stages only look at declaration values, so a selector such as
//! `#add-button` is never mistaken for a color. The document is parsed once
//! and emitted in the compact one-rule-per-line layout.
//!
//! Both stages write into one [`RootDeclarations`] accumulator, which is
//! rendered once into a `:root { ... }` block at the end.
//!
//! ```rust
//! use darkcss_remap::{substitute, Palette};
//!
//! let palette = Palette::builtin().unwrap();
//! let result = substitute("a { color: #0366d6; } b { color: #fff; }", &palette).unwrap();
//!
//! assert_eq!(
//!     result.css,
//!     "a { color: var(--base-color); }\nb { color: var(--color-gray-33); }"
//! );
//! assert!(result.root.contains("--color-gray-33: #333;"));
//! ```

use indexmap::IndexSet;
use regex::{NoExpand, Regex};
use tracing::debug;

use crate::classify::Classifier;
use crate::color::scan_tokens;
use crate::error::Result;
use crate::palette::{Palette, ACCENT_PROPERTY};
use crate::sheet::{parse_stylesheet, Stylesheet};

/// Accumulates the custom-property declarations of the generated `:root`
/// block, de-duplicated and in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootDeclarations {
    declarations: IndexSet<String>,
}

impl RootDeclarations {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an accumulator holding a definition for every swatch.
    ///
    /// Unused swatches are kept so the generated block is stable from run to
    /// run.
    pub fn seeded(palette: &Palette) -> Self {
        let mut root = Self::new();
        for swatch in palette.swatches() {
            root.add(swatch.declaration());
        }
        root
    }

    /// Adds a declaration. Returns `false` if it was already present.
    pub fn add(&mut self, declaration: impl Into<String>) -> bool {
        self.declarations.insert(declaration.into())
    }

    /// True if the exact declaration is present.
    pub fn contains(&self, declaration: &str) -> bool {
        self.declarations.contains(declaration)
    }

    /// True if a custom property named `--<name>` is defined.
    pub fn defines(&self, name: &str) -> bool {
        let prefix = format!("--{}:", name);
        self.declarations.iter().any(|d| d.starts_with(&prefix))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(String::as_str)
    }

    /// Renders the `:root` block, one tab-indented declaration per line.
    pub fn render(&self) -> String {
        let body: Vec<&str> = self.iter().collect();
        format!(":root {{\n\t{}\n}}", body.join("\n\t"))
    }
}

/// Result of [`substitute`].
#[derive(Debug, Clone)]
pub struct Substitution {
    /// Definitions for every custom property the CSS references.
    pub root: RootDeclarations,
    /// The rewritten CSS.
    pub css: String,
    /// Number of unique color tokens that were classified.
    pub tokens: usize,
}

/// Replaces base colors with the accent property and every other color token
/// with a reference to its nearest swatch.
pub fn substitute(css: &str, palette: &Palette) -> Result<Substitution> {
    let mut sheet = parse_stylesheet(css);
    let mut root = RootDeclarations::seeded(palette);
    replace_base_colors(&mut sheet, palette, &mut root)?;
    let tokens = replace_closest_colors(&mut sheet, palette, &mut root)?;
    Ok(Substitution {
        root,
        css: sheet.to_compact(),
        tokens,
    })
}

/// The reference that replaces every base color.
pub fn accent_reference() -> String {
    format!("var(--{})", ACCENT_PROPERTY)
}

/// The `:root` placeholder for the accent property, filled in by the user
/// style's settings.
pub fn accent_placeholder() -> String {
    format!("--{0}: /*[[{0}]]*/;", ACCENT_PROPERTY)
}

fn replace_base_colors(
    sheet: &mut Stylesheet,
    palette: &Palette,
    root: &mut RootDeclarations,
) -> Result<()> {
    root.add(accent_placeholder());
    let reference = accent_reference();
    for color in palette.base() {
        replace_in_values(sheet, &literal_pattern(color)?, &reference);
    }
    Ok(())
}

fn replace_closest_colors(
    sheet: &mut Stylesheet,
    palette: &Palette,
    root: &mut RootDeclarations,
) -> Result<usize> {
    let classifier = Classifier::new(palette);
    // scan_tokens yields 6-digit hex before 3-digit hex; replacing in that
    // order keeps a short token from matching inside a long one.
    let values: Vec<&str> = sheet.declarations().map(|d| d.value.as_str()).collect();
    let tokens = scan_tokens(&values.join("\n"));

    for token in &tokens {
        let class = classifier.classify(token)?;
        let replacement = match (&class.alpha, &class.rgb_triplet) {
            (Some(alpha), Some(triplet)) => {
                let name = format!("--{}-rgb", class.swatch);
                root.add(format!("{}: {};", name, triplet));
                format!("rgba(var({}), {})", name, alpha)
            }
            _ => format!("var(--{})", class.swatch),
        };
        debug!(token = %token, replacement = %replacement, "replacing color");
        replace_in_values(sheet, &literal_pattern(token)?, &replacement);
    }

    Ok(tokens.len())
}

fn replace_in_values(sheet: &mut Stylesheet, pattern: &Regex, replacement: &str) {
    for declaration in sheet.declarations_mut() {
        if pattern.is_match(&declaration.value) {
            declaration.value = pattern
                .replace_all(&declaration.value, NoExpand(replacement))
                .into_owned();
        }
    }
}

/// A case-insensitive pattern for the literal `needle`.
///
/// A needle ending in a word character only matches at a word boundary, so
/// `#fff` never rewrites the head of `#ffffff` or `#fffe`.
fn literal_pattern(needle: &str) -> Result<Regex> {
    let mut pattern = format!("(?i){}", regex::escape(needle));
    if needle.ends_with(|c: char| c.is_ascii_alphanumeric()) {
        pattern.push_str(r"\b");
    }
    Ok(Regex::new(&pattern)?)
}
