//! Stylesheet link discovery.

use reqwest::Url;
use scraper::{Html, Selector};

use crate::error::{FetchError, Result};

/// Returns the absolute URLs of every `<link rel="stylesheet" href>` in
/// `html`, in document order, resolved against `base_url`.
///
/// `rel` must equal `stylesheet` (ignoring case and surrounding whitespace);
/// `alternate stylesheet` and preloads are skipped.
pub fn extract_stylesheet_links(html: &str, base_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(base_url).map_err(|e| FetchError::invalid_url(base_url, e))?;
    let selector = Selector::parse("link[href]").map_err(|e| FetchError::Selector {
        message: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let mut links = Vec::new();
    for element in document.select(&selector) {
        let is_stylesheet = element
            .value()
            .attr("rel")
            .is_some_and(|rel| rel.trim().eq_ignore_ascii_case("stylesheet"));
        if !is_stylesheet {
            continue;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }
        let url = base.join(href).map_err(|e| FetchError::invalid_url(href, e))?;
        links.push(url.to_string());
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <link rel="stylesheet" href="https://assets.example.com/frameworks.css">
  <link rel="icon" href="/favicon.ico">
  <link crossorigin="anonymous" media="all" rel="Stylesheet" href="/assets/site.css" />
  <link rel="preload" href="/assets/font.woff2">
  <link rel="alternate stylesheet" href="/assets/alt.css">
  <link rel="stylesheet">
</head>
<body><a rel="stylesheet" href="/not-a-link.css">x</a></body>
</html>"#;

    #[test]
    fn test_extracts_stylesheets_in_order() {
        let links = extract_stylesheet_links(PAGE, "https://github.com/").unwrap();
        assert_eq!(
            links,
            vec![
                "https://assets.example.com/frameworks.css",
                "https://github.com/assets/site.css",
            ]
        );
    }

    #[test]
    fn test_resolves_relative_to_page_path() {
        let html = r#"<link rel="stylesheet" href="css/a.css">"#;
        let links = extract_stylesheet_links(html, "https://help.github.com/en/index.html").unwrap();
        assert_eq!(links, vec!["https://help.github.com/en/css/a.css"]);
    }

    #[test]
    fn test_protocol_relative_href() {
        let html = r#"<link rel="stylesheet" href="//cdn.example.com/x.css">"#;
        let links = extract_stylesheet_links(html, "https://gist.github.com").unwrap();
        assert_eq!(links, vec!["https://cdn.example.com/x.css"]);
    }

    #[test]
    fn test_no_links() {
        let links = extract_stylesheet_links("<p>plain</p>", "https://github.com").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_unresolvable_href() {
        let html = r#"<link rel="stylesheet" href="http://[broken">"#;
        let err = extract_stylesheet_links(html, "https://github.com").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { ref url, .. } if url == "http://[broken"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = extract_stylesheet_links(PAGE, "not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
