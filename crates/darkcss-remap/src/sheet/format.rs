//! Rendering a [`Stylesheet`] back to text.
//!
//! Two layouts are supported:
//!
//! | Layout | Shape | Used for |
//! |--------|-------|----------|
//! | compact | `a, b { p: v; q: w; }`, one rule per line | diagnostics, line-based tooling |
//! | expanded | one declaration per line, indented | the generated section |

use super::model::{Item, Rule, Stylesheet};

/// Options for the expanded layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per indentation level.
    pub indent: usize,
    /// Longest selector line (including indentation and ` {`) kept on one
    /// line; longer selector lists put one selector per line.
    pub max_selector_length: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            max_selector_length: 76,
        }
    }
}

impl Stylesheet {
    /// One rule per line.
    pub fn to_compact(&self) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|item| match item {
                Item::Rule(rule) => compact_rule(rule),
                Item::Group { prelude, rules } => {
                    let body: Vec<String> = rules.iter().map(compact_rule).collect();
                    format!("{} {{ {} }}", prelude, body.join(" "))
                }
            })
            .collect();
        lines.join("\n")
    }

    /// One declaration per line, wrapping long selector lists.
    pub fn to_expanded(&self, options: &FormatOptions) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                Item::Rule(rule) => expanded_rule(&mut out, rule, 0, options),
                Item::Group { prelude, rules } => {
                    out.push_str(prelude);
                    out.push_str(" {\n");
                    for rule in rules {
                        expanded_rule(&mut out, rule, 1, options);
                    }
                    out.push_str("}\n");
                }
            }
        }
        out
    }
}

fn compact_rule(rule: &Rule) -> String {
    let declarations: Vec<String> = rule.declarations.iter().map(|d| d.to_string()).collect();
    format!(
        "{} {{ {}; }}",
        rule.selectors.join(", "),
        declarations.join("; ")
    )
}

fn expanded_rule(out: &mut String, rule: &Rule, level: usize, options: &FormatOptions) {
    let pad = " ".repeat(options.indent * level);
    let inner = " ".repeat(options.indent * (level + 1));

    let single = format!("{}{} {{", pad, rule.selectors.join(", "));
    if single.len() <= options.max_selector_length || rule.selectors.len() == 1 {
        out.push_str(&single);
    } else {
        out.push_str(&pad);
        out.push_str(&rule.selectors.join(&format!(",\n{}", pad)));
        out.push_str(" {");
    }
    out.push('\n');

    for declaration in &rule.declarations {
        out.push_str(&inner);
        out.push_str(&declaration.to_string());
        out.push_str(";\n");
    }

    out.push_str(&pad);
    out.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::model::Declaration;

    fn rule(selectors: &[&str], decls: &[(&str, &str)]) -> Rule {
        Rule::new(
            selectors.iter().map(|s| s.to_string()).collect(),
            decls.iter().map(|(p, v)| Declaration::new(*p, *v)).collect(),
        )
    }

    #[test]
    fn test_compact() {
        let sheet = Stylesheet::new(vec![
            Item::Rule(rule(&[".a", ".b"], &[("color", "red"), ("fill", "blue")])),
            Item::Group {
                prelude: "@media print".into(),
                rules: vec![rule(&[".c"], &[("color", "red")])],
            },
        ]);
        assert_eq!(
            sheet.to_compact(),
            ".a, .b { color: red; fill: blue; }\n@media print { .c { color: red; } }"
        );
    }

    #[test]
    fn test_expanded_short_selectors() {
        let sheet = Stylesheet::new(vec![Item::Rule(rule(
            &[".a", ".b"],
            &[("color", "red")],
        ))]);
        assert_eq!(
            sheet.to_expanded(&FormatOptions::default()),
            ".a, .b {\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_expanded_wraps_long_selector_lists() {
        let long_a = ".a-really-long-selector-name .with-a-descendant";
        let long_b = ".another-really-long-selector .with-more";
        let sheet = Stylesheet::new(vec![Item::Rule(rule(&[long_a, long_b], &[("color", "red")]))]);
        assert_eq!(
            sheet.to_expanded(&FormatOptions::default()),
            format!("{},\n{} {{\n  color: red;\n}}\n", long_a, long_b)
        );
    }

    #[test]
    fn test_expanded_group_is_indented() {
        let sheet = Stylesheet::new(vec![Item::Group {
            prelude: "@media (max-width: 544px)".into(),
            rules: vec![rule(&[".a"], &[("color", "red")])],
        }]);
        assert_eq!(
            sheet.to_expanded(&FormatOptions::default()),
            "@media (max-width: 544px) {\n  .a {\n    color: red;\n  }\n}\n"
        );
    }
}
