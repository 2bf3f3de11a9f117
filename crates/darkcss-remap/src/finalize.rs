//! Assembling ordered sections into the final stylesheet.
//!
//! Sections are recognized by file name:
//!
//! - The intro ([`INTRO_FILE`]) is rendered as a template with the `version`
//!   variable in scope and gets no banner.
//! - Every other section is preceded by a `/*** FILE: NAME ***/` banner.
//! - Every section except the intro and the `:root` variables
//!   ([`ROOT_FILE`]) gets `!important` on each declaration so it wins over
//!   the live site's own rules. Custom property definitions stay plain
//!   assignments.

use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::Result;
use crate::structure::{INTRO_FILE, ROOT_FILE};

/// Declaration ends, plus the spans whose semicolons are not declaration
/// ends: comments, strings and `url()` arguments. Only the `end` group is
/// rewritten.
static DECLARATION_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r##"(?i)/\*[\s\S]*?\*/"##,
        r##"|"(?:[^"\\]|\\[\s\S])*""##,
        r##"|'(?:[^'\\]|\\[\s\S])*'"##,
        r##"|url\(\s*(?:"(?:[^"\\]|\\[\s\S])*"|'(?:[^'\\]|\\[\s\S])*'|[^)]*)\s*\)"##,
        r##"|(?P<end>(?:\s*!important)?\s*;)"##,
    ))
    .expect("static regex is valid")
});

/// One named chunk of the output stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// File name the section came from.
    pub name: String,
    pub body: String,
}

impl Section {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// The comment line naming this section in the output.
    pub fn banner(&self) -> String {
        format!("/*** FILE: {} ***/", self.name.to_uppercase())
    }

    fn is(&self, file: &str) -> bool {
        self.name.eq_ignore_ascii_case(file)
    }
}

/// Adds `!important` to every declaration that does not carry it yet.
///
/// Semicolons inside comments, strings and `url()` are left alone.
///
/// ```rust
/// use darkcss_remap::force_important;
///
/// assert_eq!(force_important("a { color: red; }"), "a { color: red !important; }");
/// assert_eq!(
///     force_important("a { color: red !important; }"),
///     "a { color: red !important; }"
/// );
/// assert_eq!(
///     force_important("a { background: url(data:image/png;base64,AA==); }"),
///     "a { background: url(data:image/png;base64,AA==) !important; }"
/// );
/// ```
pub fn force_important(css: &str) -> String {
    DECLARATION_END
        .replace_all(css, |caps: &Captures| match caps.name("end") {
            Some(_) => " !important;".to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Renders the intro template.
pub fn render_intro(body: &str, version: &str) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    Ok(env.render_str(body, context! { version => version })?)
}

/// Joins `sections` in order into the final stylesheet.
pub fn finalize(sections: &[Section], version: &str) -> Result<String> {
    let mut parts = Vec::with_capacity(sections.len());
    for section in sections {
        let part = if section.is(INTRO_FILE) {
            render_intro(&section.body, version)?
        } else {
            let text = format!("{}\n{}", section.banner(), section.body);
            if section.is(ROOT_FILE) {
                text
            } else {
                force_important(&text)
            }
        };
        parts.push(part);
    }
    Ok(parts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_uppercases_name() {
        assert_eq!(
            Section::new("main-buttons.css", "").banner(),
            "/*** FILE: MAIN-BUTTONS.CSS ***/"
        );
    }

    #[test]
    fn test_force_important_is_idempotent() {
        let once = force_important("a { color: red; background: blue ; }");
        assert_eq!(once, "a { color: red !important; background: blue !important; }");
        assert_eq!(force_important(&once), once);
    }

    #[test]
    fn test_force_important_normalizes_case() {
        assert_eq!(
            force_important("a { color: red !IMPORTANT; }"),
            "a { color: red !important; }"
        );
    }

    #[test]
    fn test_force_important_skips_data_uri() {
        let css = ".a { background-image: url(\"data:image/svg+xml;charset=utf8,%3Csvg%3E\"); }";
        assert_eq!(
            force_important(css),
            ".a { background-image: url(\"data:image/svg+xml;charset=utf8,%3Csvg%3E\") !important; }"
        );
    }

    #[test]
    fn test_force_important_skips_unquoted_url() {
        assert_eq!(
            force_important(".a { background: url(data:image/gif;base64,R0lGOD==) no-repeat; }"),
            ".a { background: url(data:image/gif;base64,R0lGOD==) no-repeat !important; }"
        );
    }

    #[test]
    fn test_force_important_skips_strings_and_comments() {
        let css = ".a::before { content: \"a;b\"; } /* x; y */ .b { font-family: 'c;d'; }";
        assert_eq!(
            force_important(css),
            ".a::before { content: \"a;b\" !important; } /* x; y */ .b { font-family: 'c;d' !important; }"
        );
        let once = force_important(css);
        assert_eq!(force_important(&once), once);
    }

    #[test]
    fn test_finalize_layout() {
        let sections = vec![
            Section::new("intro.css", "/* v{{ version }} */\n"),
            Section::new("_root.css", ":root {\n\t--a: #111;\n}"),
            Section::new("_temp.css", "a {\n  color: red;\n}\n"),
        ];
        let out = finalize(&sections, "1.2.3").unwrap();
        assert_eq!(
            out,
            "/* v1.2.3 */\n\n\
             /*** FILE: _ROOT.CSS ***/\n:root {\n\t--a: #111;\n}\n\
             /*** FILE: _TEMP.CSS ***/\na {\n  color: red !important;\n}\n"
        );
    }

    #[test]
    fn test_root_section_is_exempt() {
        let sections = vec![
            Section::new("intro.css", ""),
            Section::new("_root.css", "a { color: red; }"),
        ];
        let out = finalize(&sections, "1.0.0").unwrap();
        assert!(out.contains("a { color: red; }"));
        assert!(!out.contains("!important"));
    }

    #[test]
    fn test_version_only_rendered_in_intro() {
        let sections = vec![
            Section::new("intro.css", "{{ version }}"),
            Section::new("_root.css", ""),
            Section::new("outro.css", "/* {{ version }} */"),
        ];
        let out = finalize(&sections, "2.0.0").unwrap();
        assert!(out.starts_with("2.0.0\n"));
        assert!(out.ends_with("/* {{ version }} */"));
    }

    #[test]
    fn test_exemptions_follow_file_names() {
        let sections = vec![
            Section::new("_root.css", ":root { --a: {{ nope }}; }"),
            Section::new("_temp.css", "a { color: red; }"),
        ];
        let out = finalize(&sections, "1.0.0").unwrap();
        assert_eq!(
            out,
            "/*** FILE: _ROOT.CSS ***/\n:root { --a: {{ nope }}; }\n\
             /*** FILE: _TEMP.CSS ***/\na { color: red !important; }"
        );
    }

    #[test]
    fn test_intro_name_ignores_case() {
        let sections = vec![Section::new("Intro.CSS", "v{{ version }}")];
        assert_eq!(finalize(&sections, "3.0.0").unwrap(), "v3.0.0");
    }

    #[test]
    fn test_bad_intro_template_is_an_error() {
        let sections = vec![Section::new("intro.css", "{{ version ")];
        assert!(finalize(&sections, "1.0.0").is_err());
    }

    #[test]
    fn test_empty_sections() {
        assert_eq!(finalize(&[], "1.0.0").unwrap(), "");
    }
}
