//! The per-site override run.
//!
//! Like [`build`](crate::build()), every site is fetched and rendered before
//! anything is written.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use darkcss_fetch::{fetch_stylesheets, Fetch};
use darkcss_remap::{collect_variants, render_combined, render_site};
use tracing::info;

use crate::build::save;
use crate::config::VariantConfig;

/// What one site contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    pub host: String,
    pub stylesheets: usize,
    /// Mappings with at least one matching selector.
    pub rules: usize,
    pub selectors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantReport {
    /// One entry per configured site, in order.
    pub sites: Vec<SiteReport>,
    /// Site files first, the combined file last.
    pub written: Vec<PathBuf>,
}

/// Fetches each site and writes its override rules, plus the combined file.
pub fn build_variants(config: &VariantConfig, fetcher: &dyn Fetch) -> Result<VariantReport> {
    let mut reports = Vec::with_capacity(config.sites.len());
    let mut rendered = Vec::with_capacity(config.sites.len());

    for host in &config.sites {
        let request = VariantConfig::site_request(host);
        let sheets = fetch_stylesheets(fetcher, std::slice::from_ref(&request))
            .with_context(|| format!("fetching stylesheets for {}", host))?;

        let variants = collect_variants(&sheets.joined(), &config.mappings)
            .with_context(|| format!("collecting variants for {}", host))?;
        let css = render_site(&variants)?;
        info!(site = %host, rules = variants.len(), "got declarations");

        reports.push(SiteReport {
            host: host.clone(),
            stylesheets: sheets.bodies.len(),
            rules: variants.len(),
            selectors: variants.iter().map(|v| v.selectors.len()).sum(),
        });
        rendered.push((host.clone(), css));
    }

    let combined = render_combined(&rendered).context("rendering combined variants")?;

    fs::create_dir_all(&config.sites_dir)
        .with_context(|| format!("creating {}", config.sites_dir.display()))?;
    let mut written = Vec::with_capacity(rendered.len() + 1);
    for (host, css) in &rendered {
        written.push(save(&config.sites_dir.join(format!("{}.css", host)), css)?);
    }
    written.push(save(&config.combined_file, &combined)?);

    Ok(VariantReport {
        sites: reports,
        written,
    })
}
