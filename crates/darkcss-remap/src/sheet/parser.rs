//! CSS stylesheet parsing.
//!
//! The parser is built on top of `cssparser` (the same tokenizer used by
//! Firefox), which takes care of comments, escapes, strings and nested blocks.
//! It reads only as much structure as the pipeline needs:
//!
//! - **Style rules**: the selector list is split on top-level commas, and
//!   each declaration keeps its value verbatim.
//! - **Conditional groups**: `@media` and `@supports` blocks keep their style
//!   rules, one level deep.
//! - **Everything else** (`@font-face`, `@keyframes`, `@import`, ...) is
//!   dropped.
//!
//! Invalid rules are skipped the way a browser skips them, so parsing itself
//! never fails.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};
use tracing::debug;

use super::model::{split_important, Declaration, Item, Rule, Stylesheet};

/// Group at-rules whose contents are kept.
const GROUP_AT_RULES: &[&str] = &["media", "supports"];

/// Parses a stylesheet into rules and groups.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut sheet_parser = SheetParser { nested: false };

    let mut items = Vec::new();
    let mut skipped = 0usize;
    for result in cssparser::StyleSheetParser::new(&mut parser, &mut sheet_parser) {
        match result {
            Ok(Parsed::Item(item)) => items.push(item),
            Ok(Parsed::Skip) => {}
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped invalid CSS rules");
    }
    Stylesheet::new(items)
}

enum Parsed {
    Item(Item),
    Skip,
}

enum AtPrelude {
    Group(String),
    Other,
}

struct SheetParser {
    /// True while parsing the body of a group; groups do not nest further.
    nested: bool,
}

/// Consumes every remaining token and returns the raw text they span.
fn consume_raw<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start)
}

impl<'i> QualifiedRuleParser<'i> for SheetParser {
    type Prelude = Vec<String>;
    type QualifiedRule = Parsed;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let selectors = split_selectors(consume_raw(input));
        if selectors.is_empty() {
            return Err(input.new_custom_error::<(), ()>(()));
        }
        Ok(selectors)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let declarations = parse_declarations(input);
        Ok(Parsed::Item(Item::Rule(Rule::new(prelude, declarations))))
    }
}

impl<'i> AtRuleParser<'i> for SheetParser {
    type Prelude = AtPrelude;
    type AtRule = Parsed;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let raw = consume_raw(input).trim();
        let name = name.to_ascii_lowercase();
        if !self.nested && GROUP_AT_RULES.contains(&name.as_str()) {
            return Ok(AtPrelude::Group(format!("@{} {}", name, raw)));
        }
        Ok(AtPrelude::Other)
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(Parsed::Skip)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let AtPrelude::Group(prelude) = prelude else {
            return Ok(Parsed::Skip);
        };

        let mut inner = SheetParser { nested: true };
        let rules = cssparser::StyleSheetParser::new(input, &mut inner)
            .filter_map(|result| match result {
                Ok(Parsed::Item(Item::Rule(rule))) => Some(rule),
                _ => None,
            })
            .collect();

        Ok(Parsed::Item(Item::Group { prelude, rules }))
    }
}

fn parse_declarations<'i>(input: &mut Parser<'i, '_>) -> Vec<Declaration> {
    let mut decl_parser = RuleDeclarationParser;
    RuleBodyParser::new(input, &mut decl_parser)
        .flatten()
        .collect()
}

struct RuleDeclarationParser;

impl<'i> DeclarationParser<'i> for RuleDeclarationParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let (value, important) = split_important(consume_raw(input).trim());
        if value.is_empty() {
            return Err(input.new_custom_error::<(), ()>(()));
        }
        Ok(Declaration {
            property: name.as_ref().to_string(),
            value: value.to_string(),
            important,
        })
    }
}

impl<'i> AtRuleParser<'i> for RuleDeclarationParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for RuleDeclarationParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for RuleDeclarationParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Splits a selector list on commas that are not inside parentheses,
/// brackets or strings. Whitespace inside each selector is collapsed.
pub fn split_selectors(prelude: &str) -> Vec<String> {
    let mut selectors = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in prelude.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    push_selector(&mut selectors, &current);
                    current.clear();
                    continue;
                }
                _ => {}
            },
        }
        current.push(c);
    }
    push_selector(&mut selectors, &current);
    selectors
}

fn push_selector(selectors: &mut Vec<String>, raw: &str) {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        selectors.push(collapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rule() {
        let sheet = parse_stylesheet(".a, .b { color: #fff; background-color: red }");
        assert_eq!(
            sheet.items,
            vec![Item::Rule(Rule::new(
                vec![".a".into(), ".b".into()],
                vec![
                    Declaration::new("color", "#fff"),
                    Declaration::new("background-color", "red"),
                ],
            ))]
        );
    }

    #[test]
    fn test_parse_important() {
        let sheet = parse_stylesheet(".a { color: #fff !important; }");
        let Item::Rule(rule) = &sheet.items[0] else {
            panic!("expected rule");
        };
        assert_eq!(rule.declarations[0], Declaration::new("color", "#fff").important());
    }

    #[test]
    fn test_parse_keeps_function_values_verbatim() {
        let sheet = parse_stylesheet(".a { box-shadow: 0 1px 0 rgba(27, 31, 35, 0.04), inset 0 1px 0 #fff; }");
        let Item::Rule(rule) = &sheet.items[0] else {
            panic!("expected rule");
        };
        assert_eq!(
            rule.declarations[0].value,
            "0 1px 0 rgba(27, 31, 35, 0.04), inset 0 1px 0 #fff"
        );
    }

    #[test]
    fn test_parse_media_group() {
        let sheet = parse_stylesheet("@media (max-width: 544px) { .a { color: red; } }");
        assert_eq!(
            sheet.items,
            vec![Item::Group {
                prelude: "@media (max-width: 544px)".into(),
                rules: vec![Rule::new(
                    vec![".a".into()],
                    vec![Declaration::new("color", "red")]
                )],
            }]
        );
    }

    #[test]
    fn test_parse_drops_other_at_rules() {
        let css = "@charset \"utf-8\"; @font-face { font-family: x; } @keyframes spin { from { color: red; } } .a { color: red; }";
        let sheet = parse_stylesheet(css);
        assert_eq!(sheet.items.len(), 1);
        assert_eq!(sheet.rule_count(), 1);
    }

    #[test]
    fn test_parse_skips_invalid_declarations() {
        let sheet = parse_stylesheet(".a { color; background-color: red; : blue; }");
        let Item::Rule(rule) = &sheet.items[0] else {
            panic!("expected rule");
        };
        assert_eq!(
            rule.declarations,
            vec![Declaration::new("background-color", "red")]
        );
    }

    #[test]
    fn test_parse_ignores_comments() {
        let sheet = parse_stylesheet("/* header */ .a { /* c */ color: red; }");
        assert_eq!(sheet.rule_count(), 1);
    }

    #[test]
    fn test_split_selectors_respects_parentheses() {
        assert_eq!(
            split_selectors(".a:not(.b, .c), .d [data-x=\"1,2\"]"),
            vec![".a:not(.b, .c)", ".d [data-x=\"1,2\"]"]
        );
    }

    #[test]
    fn test_split_selectors_collapses_whitespace() {
        assert_eq!(
            split_selectors("  .a\n  .b ,\n.c  "),
            vec![".a .b", ".c"]
        );
    }
}
