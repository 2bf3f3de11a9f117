//! Selector filtering, declaration stripping and final formatting.
//!
//! Cleanup runs on the substituted CSS and applies two ordered rule tables:
//!
//! - [`SELECTOR_DENY_LIST`]: selectors matching any entry are removed from
//!   their rule. Components that are already dark (the site header) or that
//!   bring their own colors (syntax highlighters, code editors) must not be
//!   restyled, and bare anchor selectors would override the accent color.
//! - [`DECLARATION_REWRITES`]: declarations matching an entry are rewritten
//!   with its replacement; an empty result removes the declaration.
//!   Light-mode shadows and zeroed border colors are stripped this way.
//!
//! A rule that loses all its selectors or all its declarations disappears.
//! Surviving rules get sorted, de-duplicated selector lists, consecutive
//! rules with identical blocks are merged, and the result is emitted in the
//! expanded layout.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sheet::{parse_stylesheet, Declaration, FormatOptions, Rule};

/// A named selector pattern.
#[derive(Debug)]
pub struct SelectorFilter {
    pub name: &'static str,
    pub pattern: Regex,
}

/// A named declaration rewrite. An empty replacement strips the declaration.
#[derive(Debug)]
pub struct DeclarationRewrite {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

fn selector(name: &'static str, pattern: &str) -> SelectorFilter {
    SelectorFilter {
        name,
        pattern: Regex::new(pattern).expect("static regex is valid"),
    }
}

fn rewrite(name: &'static str, pattern: &str, replacement: &'static str) -> DeclarationRewrite {
    DeclarationRewrite {
        name,
        pattern: Regex::new(pattern).expect("static regex is valid"),
        replacement,
    }
}

/// Selectors that are never restyled.
pub static SELECTOR_DENY_LIST: Lazy<Vec<SelectorFilter>> = Lazy::new(|| {
    vec![
        selector("header", r"^\.Header"),
        selector("codemirror", r"^\.CodeMirror"),
        selector("codemirror-token", r"^\.cm-"),
        selector("pretty-lights", r"^\.pl-"),
        selector("trailing-pre", r"\spre$"),
        selector("plain-anchor", r"^(a:visited|a)$"),
    ]
});

/// Declaration rewrites, applied in order to `property: value` text.
pub static DECLARATION_REWRITES: Lazy<Vec<DeclarationRewrite>> = Lazy::new(|| {
    vec![
        rewrite("box-shadow", r"(?i)^(-[a-z]+-)?box-shadow\s*:[\s\S]*$", ""),
        rewrite("text-shadow", r"(?i)^(-[a-z]+-)?text-shadow\s*:[\s\S]*$", ""),
        rewrite(
            "zero-color",
            r"(?i)^[a-z-]*color\s*:\s*0\s*(!important)?;?$",
            "",
        ),
    ]
});

/// Returns the name of the deny-list entry matching `selector`, if any.
pub fn denied_by(selector: &str) -> Option<&'static str> {
    SELECTOR_DENY_LIST
        .iter()
        .find(|f| f.pattern.is_match(selector))
        .map(|f| f.name)
}

/// Applies [`DECLARATION_REWRITES`] to one declaration. Returns `None` if the
/// declaration was stripped.
pub fn rewrite_declaration(declaration: Declaration) -> Option<Declaration> {
    let mut text = declaration.to_string();
    let mut rewritten = false;
    for rule in DECLARATION_REWRITES.iter() {
        if rule.pattern.is_match(&text) {
            text = rule
                .pattern
                .replace_all(&text, rule.replacement)
                .into_owned();
            rewritten = true;
        }
    }
    if !rewritten {
        return Some(declaration);
    }
    Declaration::from_text(text.trim())
}

fn clean_rule(rule: Rule) -> Option<Rule> {
    let mut selectors: Vec<String> = rule
        .selectors
        .into_iter()
        .filter(|s| denied_by(s).is_none())
        .collect();
    if selectors.is_empty() {
        return None;
    }
    selectors.sort();
    selectors.dedup();

    let declarations: Vec<Declaration> = rule
        .declarations
        .into_iter()
        .filter_map(rewrite_declaration)
        .collect();

    Some(Rule::new(selectors, declarations))
}

/// Filters, strips, merges and formats `css`.
pub fn cleanup(css: &str) -> String {
    parse_stylesheet(css)
        .filter_map_rules(clean_rule)
        .merge_adjacent()
        .to_expanded(&FormatOptions::default())
}
