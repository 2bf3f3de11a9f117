//! In-memory rule model.

use std::fmt;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub property: String,
    /// The value as written, without `!important`.
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// Reads a declaration back from its `property: value` text.
    ///
    /// Returns `None` for text without a property or value.
    pub fn from_text(text: &str) -> Option<Self> {
        let (property, value) = text.split_once(':')?;
        let property = property.trim();
        let (value, important) = split_important(value.trim());
        if property.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            property: property.to_string(),
            value: value.to_string(),
            important,
        })
    }
}

/// Splits a trailing `!important` off a raw value.
pub(crate) fn split_important(raw: &str) -> (&str, bool) {
    let raw = raw.trim_end_matches(';').trim_end();
    let lower = raw.to_ascii_lowercase();
    match lower.strip_suffix("important").map(str::trim_end) {
        Some(rest) if rest.ends_with('!') => (raw[..rest.len() - 1].trim_end(), true),
        _ => (raw, false),
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

/// A style rule: a selector list and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selectors: Vec<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }

    /// A rule with no selectors or no declarations produces no output.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty() || self.declarations.is_empty()
    }
}

/// A top-level stylesheet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Rule(Rule),
    /// A conditional group such as `@media` or `@supports`, holding the
    /// at-rule prelude (`@media (max-width: 544px)`) and its rules.
    Group { prelude: String, rules: Vec<Rule> },
}

/// An ordered list of rules and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub items: Vec<Item>,
}

impl Stylesheet {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of style rules, including the rules inside groups.
    pub fn rule_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Item::Rule(_) => 1,
                Item::Group { rules, .. } => rules.len(),
            })
            .sum()
    }

    /// Every declaration in document order, including those inside groups.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items
            .iter()
            .flat_map(|item| match item {
                Item::Rule(rule) => std::slice::from_ref(rule),
                Item::Group { rules, .. } => rules.as_slice(),
            })
            .flat_map(|rule| rule.declarations.iter())
    }

    /// Mutable access to every declaration in document order.
    pub fn declarations_mut(&mut self) -> impl Iterator<Item = &mut Declaration> {
        self.items
            .iter_mut()
            .flat_map(|item| match item {
                Item::Rule(rule) => std::slice::from_mut(rule),
                Item::Group { rules, .. } => rules.as_mut_slice(),
            })
            .flat_map(|rule| rule.declarations.iter_mut())
    }

    /// Rewrites every rule, top-level and grouped, through `f`.
    ///
    /// Rules for which `f` returns `None`, or which come back empty, are
    /// dropped. Groups left without rules are dropped too.
    pub fn filter_map_rules<F>(self, mut f: F) -> Self
    where
        F: FnMut(Rule) -> Option<Rule>,
    {
        let mut keep = |rule: Rule| f(rule).filter(|r| !r.is_empty());

        let items = self
            .items
            .into_iter()
            .filter_map(|item| match item {
                Item::Rule(rule) => keep(rule).map(Item::Rule),
                Item::Group { prelude, rules } => {
                    let rules: Vec<Rule> = rules.into_iter().filter_map(&mut keep).collect();
                    (!rules.is_empty()).then_some(Item::Group { prelude, rules })
                }
            })
            .collect();

        Self { items }
    }

    /// Coalesces consecutive rules with identical declaration blocks.
    ///
    /// Only neighbours are merged: folding a later rule into an earlier,
    /// non-adjacent one would move it across the rules in between and change
    /// the cascade.
    pub fn merge_adjacent(self) -> Self {
        let mut items: Vec<Item> = Vec::with_capacity(self.items.len());
        for item in self.items {
            match item {
                Item::Rule(rule) => {
                    if let Some(Item::Rule(prev)) = items.last_mut() {
                        if prev.declarations == rule.declarations {
                            absorb_selectors(prev, rule.selectors);
                            continue;
                        }
                    }
                    items.push(Item::Rule(rule));
                }
                Item::Group { prelude, rules } => items.push(Item::Group {
                    prelude,
                    rules: merge_rules(rules),
                }),
            }
        }
        Self { items }
    }
}

fn merge_rules(rules: Vec<Rule>) -> Vec<Rule> {
    let mut merged: Vec<Rule> = Vec::with_capacity(rules.len());
    for rule in rules {
        match merged.last_mut() {
            Some(prev) if prev.declarations == rule.declarations => {
                absorb_selectors(prev, rule.selectors)
            }
            _ => merged.push(rule),
        }
    }
    merged
}

fn absorb_selectors(rule: &mut Rule, selectors: Vec<String>) {
    for selector in selectors {
        if !rule.selectors.contains(&selector) {
            rule.selectors.push(selector);
        }
    }
    rule.selectors.sort();
}
