//! Colors-only reduction of a stylesheet.
//!
//! The live site ships hundreds of kilobytes of CSS; only the declarations
//! that paint something matter for a dark theme. [`extract_colors`] keeps
//! those and drops the rest:
//!
//! - color longhands (`color`, `background-color`, `border-top-color`,
//!   `fill`, `box-shadow`, ...) are kept verbatim when their value mentions a
//!   color;
//! - shorthands (`background`, `border`, `border-left`, `outline`) are
//!   reduced to their `-color` longhand carrying only the color part,
//!   so `border: 1px solid #e1e4e8` becomes `border-color: #e1e4e8`;
//! - rules left without declarations, groups left without rules, and every
//!   at-rule other than `@media`/`@supports` disappear.
//!
//! ```rust
//! let css = ".box { border: 1px solid #e1e4e8; padding: 8px; color: #24292e; }";
//! assert_eq!(
//!     darkcss_remap::extract_colors(css),
//!     ".box { border-color: #e1e4e8; color: #24292e; }"
//! );
//! ```

use crate::sheet::{parse_stylesheet, Declaration, Rule};

/// Longhands whose value is kept verbatim when it contains a color.
const COLOR_LONGHANDS: &[&str] = &[
    "color",
    "background-color",
    "border-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
    "fill",
    "stroke",
    "caret-color",
    "column-rule-color",
    "text-decoration-color",
    "box-shadow",
    "text-shadow",
];

/// Shorthands reduced to their color longhand.
const COLOR_SHORTHANDS: &[(&str, &str)] = &[
    ("background", "background-color"),
    ("border", "border-color"),
    ("border-top", "border-top-color"),
    ("border-right", "border-right-color"),
    ("border-bottom", "border-bottom-color"),
    ("border-left", "border-left-color"),
    ("outline", "outline-color"),
];

/// Basic color keywords.
const COLOR_KEYWORDS: &[&str] = &[
    "transparent", "black", "silver", "gray", "grey", "white", "maroon", "red", "purple",
    "fuchsia", "green", "lime", "olive", "yellow", "navy", "blue", "teal", "aqua", "orange",
];

const COLOR_FUNCTIONS: &[&str] = &["rgb(", "rgba(", "hsl(", "hsla("];

/// Reduces `css` to its color-bearing declarations, one rule per line.
pub fn extract_colors(css: &str) -> String {
    parse_stylesheet(css)
        .filter_map_rules(colors_only)
        .to_compact()
}

fn colors_only(rule: Rule) -> Option<Rule> {
    let declarations: Vec<Declaration> = rule
        .declarations
        .into_iter()
        .filter_map(color_declaration)
        .collect();
    Some(Rule::new(rule.selectors, declarations))
}

fn color_declaration(declaration: Declaration) -> Option<Declaration> {
    let property = declaration.property.to_ascii_lowercase();

    if COLOR_LONGHANDS.contains(&property.as_str()) {
        return value_components(&declaration.value)
            .iter()
            .any(|c| is_color(c))
            .then_some(declaration);
    }

    let (_, longhand) = COLOR_SHORTHANDS.iter().find(|(s, _)| *s == property)?;
    let colors: Vec<&str> = value_components(&declaration.value)
        .into_iter()
        .filter(|c| is_color(c))
        .collect();
    if colors.is_empty() {
        return None;
    }
    Some(Declaration {
        property: longhand.to_string(),
        value: colors.join(" "),
        important: declaration.important,
    })
}

/// Splits a value on whitespace and commas outside parentheses.
fn value_components(value: &str) -> Vec<&str> {
    let mut components = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        let separator = depth == 0 && (c.is_whitespace() || c == ',');
        match (separator, start) {
            (true, Some(s)) => {
                components.push(&value[s..i]);
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        components.push(&value[s..]);
    }
    components
}

fn is_color(component: &str) -> bool {
    if let Some(hex) = component.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let lower = component.to_ascii_lowercase();
    COLOR_FUNCTIONS.iter().any(|f| lower.starts_with(f)) || COLOR_KEYWORDS.contains(&lower.as_str())
}
