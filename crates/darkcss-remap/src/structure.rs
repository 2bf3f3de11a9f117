//! Section files and their order in the final stylesheet.
//!
//! The output is assembled from the files of a styles directory. Which files
//! take part, and in what order, is decided by [`SECTION_PATTERNS`]: each
//! pattern claims the matching files (alphabetically) that no earlier
//! pattern claimed. Files matching nothing are left out.

use regex::Regex;

use crate::error::Result;

/// Hand-written opening of the user style, rendered with the version.
pub const INTRO_FILE: &str = "intro.css";
/// Generated `:root` block.
pub const ROOT_FILE: &str = "_root.css";
/// Generated, cleaned-up color rules.
pub const GENERATED_FILE: &str = "_temp.css";
/// Colors-only CSS before substitution. Diagnostic only, never assembled.
pub const COLORS_FILE: &str = "_temp_before.css";

/// Section file patterns in output order. `*` matches any run of characters;
/// matching ignores case.
pub const SECTION_PATTERNS: &[&str] = &[
    INTRO_FILE,
    ROOT_FILE,
    GENERATED_FILE,
    "main-*.css",
    "extra-*.css",
    "outro.css",
];

fn compile(pattern: &str) -> Result<Regex> {
    let body: Vec<String> = pattern.split('*').map(regex::escape).collect();
    Ok(Regex::new(&format!("(?i)^{}$", body.join(".*")))?)
}

/// Orders `names` by [`SECTION_PATTERNS`].
///
/// ```rust
/// use darkcss_remap::order_sections;
///
/// let names = ["outro.css", "main-b.css", "_temp_before.css", "intro.css", "main-a.css"];
/// assert_eq!(
///     order_sections(&names).unwrap(),
///     vec!["intro.css", "main-a.css", "main-b.css", "outro.css"]
/// );
/// ```
pub fn order_sections<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>> {
    let mut remaining: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    remaining.sort_unstable();
    remaining.dedup();

    let mut ordered = Vec::with_capacity(remaining.len());
    for pattern in SECTION_PATTERNS {
        let re = compile(pattern)?;
        let (matched, rest): (Vec<&str>, Vec<&str>) =
            remaining.into_iter().partition(|name| re.is_match(name));
        ordered.extend(matched.into_iter().map(str::to_string));
        remaining = rest;
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_order() {
        let names = [
            "outro.css",
            "extra-gist.css",
            "main-markdown.css",
            "_temp.css",
            "_root.css",
            "main-buttons.css",
            "intro.css",
        ];
        assert_eq!(
            order_sections(&names).unwrap(),
            vec![
                "intro.css",
                "_root.css",
                "_temp.css",
                "main-buttons.css",
                "main-markdown.css",
                "extra-gist.css",
                "outro.css",
            ]
        );
    }

    #[test]
    fn test_unmatched_files_are_excluded() {
        let names = ["intro.css", COLORS_FILE, "notes.txt", "main.css"];
        assert_eq!(order_sections(&names).unwrap(), vec!["intro.css"]);
    }

    #[test]
    fn test_matching_ignores_case() {
        let names = ["Main-Header.CSS", "INTRO.css"];
        assert_eq!(
            order_sections(&names).unwrap(),
            vec!["INTRO.css", "Main-Header.CSS"]
        );
    }

    #[test]
    fn test_dot_is_literal() {
        let names = ["introXcss"];
        assert!(order_sections(&names).unwrap().is_empty());
    }
}
