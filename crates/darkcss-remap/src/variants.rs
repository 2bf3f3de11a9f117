//! Per-site override rules.
//!
//! Some declarations are too dim on a dark background no matter which swatch
//! they land on. A [`Mapping`] names such a declaration (`color: #586069`)
//! and the declaration that should win instead (`color: #bbb !important`).
//! [`collect_variants`] finds every top-level selector in a site's CSS that
//! carries the `from` declaration, and [`render_site`] writes one rule per
//! mapping:
//!
//! ```text
//! /* "color: #586069" -> "color: #bbb !important" */
//! .Link--muted, .text-gray {
//!   color: #bbb !important;
//! }
//! ```
//!
//! [`render_combined`] wraps each site's rules in an
//! `@-moz-document domain(...)` block and joins them into one file.

use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};

use crate::error::{RemapError, Result};
use crate::sheet::{parse_stylesheet, Declaration, FormatOptions, Item, Rule, Stylesheet};

/// The built-in `(from, to)` declaration pairs.
pub const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    ("color: #444d56", "color: #ccc !important"),
    ("color: #586069", "color: #bbb !important"),
    ("color: #6a737d", "color: #aaa !important"),
];

/// Indentation of a site's rules inside its `@-moz-document` block.
const COMBINED_INDENT: &str = "    ";

const COMBINED_TEMPLATE: &str = "\
{% for site in sites %}@-moz-document domain(\"{{ site.host }}\") {
    {{ site.css }}
}
{% if not loop.last %}
{% endif %}{% endfor %}";

/// A declaration to look for and the declaration that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub from: String,
    pub to: String,
}

impl Mapping {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The [`DEFAULT_MAPPINGS`] table.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_MAPPINGS
            .iter()
            .map(|(from, to)| Self::new(*from, *to))
            .collect()
    }

    fn parse(&self) -> Result<(Declaration, Declaration)> {
        let parse = |text: &str| {
            Declaration::from_text(text).ok_or_else(|| RemapError::mapping(text))
        };
        Ok((parse(&self.from)?, parse(&self.to)?))
    }
}

/// The selectors of one site that matched one mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub mapping: Mapping,
    /// Sorted and de-duplicated.
    pub selectors: Vec<String>,
}

/// Finds, for each mapping, the top-level selectors whose rule declares the
/// mapping's `from` declaration.
///
/// Property names and values compare case-insensitively and `!important` is
/// ignored. Selectors starting with `:` (vendor pseudo-elements such as
/// `::-webkit-input-placeholder`) are skipped, since one invalid selector
/// would void the whole generated rule. Mappings that match nothing are
/// left out; the rest keep table order.
pub fn collect_variants(css: &str, mappings: &[Mapping]) -> Result<Vec<Variant>> {
    let sheet = parse_stylesheet(css);
    let mut variants = Vec::new();

    for mapping in mappings {
        let (from, _) = mapping.parse()?;
        let mut selectors: Vec<String> = sheet
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Rule(rule) => Some(rule),
                Item::Group { .. } => None,
            })
            .filter(|rule| rule.declarations.iter().any(|d| declares(d, &from)))
            .flat_map(|rule| rule.selectors.iter())
            .filter(|selector| !selector.starts_with(':'))
            .cloned()
            .collect();

        if selectors.is_empty() {
            continue;
        }
        selectors.sort();
        selectors.dedup();
        variants.push(Variant {
            mapping: mapping.clone(),
            selectors,
        });
    }

    Ok(variants)
}

fn declares(declaration: &Declaration, wanted: &Declaration) -> bool {
    declaration.property.eq_ignore_ascii_case(&wanted.property)
        && declaration.value.eq_ignore_ascii_case(&wanted.value)
}

/// Renders a site's variants: a comment naming the mapping, then the rule.
pub fn render_site(variants: &[Variant]) -> Result<String> {
    let options = FormatOptions::default();
    let mut out = String::new();
    for variant in variants {
        let (_, to) = variant.mapping.parse()?;
        out.push_str(&format!(
            "/* \"{}\" -> \"{}\" */\n",
            variant.mapping.from, variant.mapping.to
        ));
        let rule = Rule::new(variant.selectors.clone(), vec![to]);
        out.push_str(&Stylesheet::new(vec![Item::Rule(rule)]).to_expanded(&options));
    }
    Ok(out)
}

/// Joins per-site CSS into one file, one `@-moz-document` block per site.
///
/// `sites` holds `(host, css)` pairs; sites with no rules are skipped.
pub fn render_combined(sites: &[(String, String)]) -> Result<String> {
    let blocks: Vec<_> = sites
        .iter()
        .filter(|(_, css)| !css.trim().is_empty())
        .map(|(host, css)| context! { host => host, css => indent_tail(css) })
        .collect();

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    Ok(env.render_str(COMBINED_TEMPLATE, context! { sites => blocks })?)
}

/// Indents every line but the first, then trims.
fn indent_tail(css: &str) -> String {
    css.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", COMBINED_INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
