//! Property-based tests for the remapping pipeline using proptest.

use darkcss_remap::{
    force_important, order_sections, scan_tokens, substitute, Classifier, Palette,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn hex6_strategy() -> impl Strategy<Value = String> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| format!("#{:02x}{:02x}{:02x}", r, g, b))
}

fn hex3_strategy() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{3}".prop_map(|digits| format!("#{}", digits))
}

fn rgba_strategy() -> impl Strategy<Value = String> {
    (any::<[u8; 3]>(), prop::sample::select(vec!["0", "0.05", ".5", "1"]))
        .prop_map(|([r, g, b], a)| format!("rgba({}, {}, {}, {})", r, g, b, a))
}

fn color_strategy() -> impl Strategy<Value = String> {
    prop_oneof![hex6_strategy(), hex3_strategy(), rgba_strategy()]
}

fn stylesheet_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(color_strategy(), 1..20).prop_map(|colors| {
        colors
            .iter()
            .enumerate()
            .map(|(i, c)| format!(".r{} {{ color: {}; }}", i, c))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn declaration_text_strategy() -> impl Strategy<Value = String> {
    let pieces = vec![
        "color: red",
        "a",
        " ",
        "\t",
        ";",
        "!important",
        "!IMPORTANT",
        " }",
        "{ ",
    ];
    prop::collection::vec(prop::sample::select(pieces), 0..16).prop_map(|p| p.concat())
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// The same token always maps to the same swatch, and that swatch is in
    /// the palette.
    #[test]
    fn classification_is_deterministic(token in color_strategy()) {
        let palette = Palette::builtin().unwrap();
        let classifier = Classifier::new(&palette);

        let first = classifier.classify(&token).unwrap();
        let second = classifier.classify(&token).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(palette.swatch(&first.swatch).is_some());
        prop_assert_eq!(first.is_alpha(), token.starts_with("rgba("));
        prop_assert_eq!(first.alpha.is_some(), first.rgb_triplet.is_some());
    }

    /// No color token survives substitution, and every reference it leaves
    /// behind is defined in the root block.
    #[test]
    fn substitution_is_complete(css in stylesheet_strategy()) {
        let palette = Palette::builtin().unwrap();
        let result = substitute(&css, &palette).unwrap();

        prop_assert!(scan_tokens(&result.css).is_empty(), "left over: {}", result.css);
        for chunk in result.css.split("var(--").skip(1) {
            let name = chunk.split(')').next().unwrap();
            prop_assert!(result.root.defines(name), "undefined --{}", name);
        }
    }

    /// Forcing `!important` twice is the same as forcing it once.
    #[test]
    fn force_important_is_idempotent(text in declaration_text_strategy()) {
        let once = force_important(&text);
        prop_assert_eq!(force_important(&once), once);
    }

    /// Ordering only ever selects from the input and never repeats a name.
    #[test]
    fn order_sections_selects_subset(
        names in prop::collection::vec(
            prop::sample::select(vec![
                "intro.css", "_root.css", "_temp.css", "_temp_before.css",
                "main-a.css", "main-b.css", "extra-x.css", "outro.css", "notes.txt",
            ]),
            0..12,
        )
    ) {
        let ordered = order_sections(&names).unwrap();
        let mut seen = std::collections::HashSet::new();
        for name in &ordered {
            prop_assert!(names.contains(&name.as_str()));
            prop_assert!(seen.insert(name.clone()));
        }
        prop_assert!(!ordered.iter().any(|n| n == "_temp_before.css" || n == "notes.txt"));
    }
}
