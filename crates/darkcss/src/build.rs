//! The generation run, from source pages to the assembled user style.
//!
//! Everything is computed before anything is written: if any stage fails,
//! no stage file and no output file is touched.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use darkcss_fetch::{fetch_stylesheets, Fetch, Request};
use darkcss_remap::sheet::parse_stylesheet;
use darkcss_remap::{
    cleanup, extract_colors, finalize, order_sections, substitute, Palette, Section, COLORS_FILE,
    GENERATED_FILE, ROOT_FILE,
};
use tracing::{debug, info};

use crate::config::BuildConfig;

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Stylesheets fetched from the source pages.
    pub stylesheets: usize,
    /// Unique color tokens matched to swatches.
    pub tokens: usize,
    /// Style rules in the generated section.
    pub rules: usize,
    /// Sections assembled into the output, in order.
    pub sections: Vec<String>,
    /// Files written, stage files first and the output last.
    pub written: Vec<PathBuf>,
}

/// Runs the whole pipeline with `fetcher` as the network.
pub fn build(config: &BuildConfig, fetcher: &dyn Fetch) -> Result<BuildReport> {
    let palette = Palette::builtin().context("loading palette")?;

    let pages: Vec<Request> = config.sources.iter().map(|s| s.request()).collect();
    let sheets = fetch_stylesheets(fetcher, &pages).context("fetching stylesheets")?;

    let colors = extract_colors(&sheets.joined());
    let substituted = substitute(&colors, &palette).context("substituting colors")?;
    let rules = cleanup(&substituted.css);
    let root = substituted.root.render();

    let generated = [
        (COLORS_FILE, colors.as_str()),
        (ROOT_FILE, root.as_str()),
        (GENERATED_FILE, rules.as_str()),
    ];

    let sections = load_sections(&config.styles_dir, &generated)?;
    let names: Vec<String> = sections.iter().map(|s| s.name.clone()).collect();
    let output = finalize(&sections, &config.version).context("assembling output")?;

    let mut written = Vec::with_capacity(generated.len() + 1);
    for (name, body) in generated {
        written.push(save(&config.styles_dir.join(name), body)?);
    }
    written.push(save(&config.output_file, &output)?);

    Ok(BuildReport {
        stylesheets: sheets.bodies.len(),
        tokens: substituted.tokens,
        rules: parse_stylesheet(&rules).rule_count(),
        sections: names,
        written,
    })
}

/// Reads the sections of `dir` in output order, taking generated files from
/// memory instead of disk.
fn load_sections(dir: &Path, generated: &[(&str, &str)]) -> Result<Vec<Section>> {
    let mut names: BTreeSet<String> = generated.iter().map(|(n, _)| n.to_string()).collect();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading styles directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading styles directory {}", dir.display()))?;
        if entry.file_type()?.is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }

    let names: Vec<String> = names.into_iter().collect();
    let ordered = order_sections(&names).context("ordering sections")?;

    ordered
        .into_iter()
        .map(|name| -> Result<Section> {
            let body = match generated.iter().find(|(n, _)| *n == name) {
                Some((_, body)) => body.to_string(),
                None => {
                    let path = dir.join(&name);
                    fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?
                }
            };
            debug!(section = %name, bytes = body.len(), "loaded section");
            Ok(Section::new(name, body))
        })
        .collect()
}

pub(crate) fn save(path: &Path, contents: &str) -> Result<PathBuf> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!("saved {}", path.display());
    Ok(path.to_path_buf())
}
