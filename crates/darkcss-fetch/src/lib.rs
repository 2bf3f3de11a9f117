//! # darkcss-fetch - Pages and Their Stylesheets
//!
//! Network plumbing for `darkcss`: fetch a set of pages, find the stylesheets
//! they link, fetch those, and hand back the CSS text.
//!
//! All network access goes through the [`Fetch`] trait, so callers and tests
//! can swap [`HttpFetcher`] for an in-memory implementation.
//!
//! Requests within one stage run concurrently on the rayon pool. Results
//! always come back in request order, and the first failure aborts the
//! stage: there are no retries and no partial results.

mod client;
mod error;
mod links;

use rayon::prelude::*;
use tracing::info;

pub use client::{Fetch, HttpFetcher, Page, Request};
pub use error::{FetchError, Result};
pub use links::extract_stylesheet_links;

/// Fetches every request concurrently. The output is in request order.
pub fn fetch_all(fetcher: &dyn Fetch, requests: &[Request]) -> Result<Vec<Page>> {
    requests
        .par_iter()
        .map(|request| fetcher.fetch(request))
        .collect()
}

/// Stylesheets linked from a set of pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheets {
    /// Absolute stylesheet URLs, in page order then document order.
    pub urls: Vec<String>,
    /// Stylesheet bodies, parallel to `urls`.
    pub bodies: Vec<String>,
}

impl Stylesheets {
    /// All bodies joined with newlines.
    pub fn joined(&self) -> String {
        self.bodies.join("\n")
    }
}

/// Fetches `pages`, discovers their stylesheet links and fetches those.
pub fn fetch_stylesheets(fetcher: &dyn Fetch, pages: &[Request]) -> Result<Stylesheets> {
    for page in pages {
        info!("pulling declarations from {}", page.url);
    }
    let fetched = fetch_all(fetcher, pages)?;

    let mut urls = Vec::new();
    for page in &fetched {
        urls.extend(extract_stylesheet_links(&page.body, &page.final_url)?);
    }
    info!(count = urls.len(), "found stylesheets");

    let requests: Vec<Request> = urls.iter().map(Request::get).collect();
    let bodies = fetch_all(fetcher, &requests)?
        .into_iter()
        .map(|page| page.body)
        .collect();

    Ok(Stylesheets { urls, bodies })
}
