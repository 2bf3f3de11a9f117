//! Compiled-in configuration.
//!
//! The tool takes no runtime options: what to fetch and where to write is
//! fixed here. [`BuildConfig`] and [`VariantConfig`] are still plain serde
//! types so tests (and embedders) can build their own.

use std::path::PathBuf;

use darkcss_fetch::Request;
use darkcss_remap::Mapping;
use serde::{Deserialize, Serialize};

/// Pages whose linked stylesheets are themed.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://github.com",
    "https://gist.github.com",
    "https://help.github.com",
];

/// Hand-written sections and generated stage files live here.
pub const DEFAULT_STYLES_DIR: &str = "styles";

/// The assembled user style.
pub const DEFAULT_OUTPUT_FILE: &str = "github-dark.user.css";

/// Hosts that get their own override file.
pub const DEFAULT_SITES: &[&str] = &[
    "github.com",
    "gist.github.com",
    "guides.github.com",
    "help.github.com",
    "status.github.com",
    "developer.github.com",
];

/// Per-site override files are written here, as `<host>.css`.
pub const DEFAULT_SITES_DIR: &str = "sites";

/// Every site's overrides in one file.
pub const DEFAULT_COMBINED_FILE: &str = "github-dark.css";

/// A page to pull stylesheets from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    /// Extra request headers, e.g. a mobile `User-Agent`.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl Source {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn request(&self) -> Request {
        self.headers
            .iter()
            .fold(Request::get(&self.url), |req, (name, value)| {
                req.header(name, value)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub sources: Vec<Source>,
    pub styles_dir: PathBuf,
    pub output_file: PathBuf,
    /// Substituted into the intro section.
    pub version: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|url| Source::new(*url)).collect(),
            styles_dir: PathBuf::from(DEFAULT_STYLES_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Settings for the per-site override run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Host names; each is fetched as `https://<host>`.
    pub sites: Vec<String>,
    pub sites_dir: PathBuf,
    pub combined_file: PathBuf,
    #[serde(default = "Mapping::defaults")]
    pub mappings: Vec<Mapping>,
}

impl VariantConfig {
    pub fn site_request(host: &str) -> Request {
        Request::get(format!("https://{}", host))
    }
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            sites: DEFAULT_SITES.iter().map(|s| s.to_string()).collect(),
            sites_dir: PathBuf::from(DEFAULT_SITES_DIR),
            combined_file: PathBuf::from(DEFAULT_COMBINED_FILE),
            mappings: Mapping::defaults(),
        }
    }
}
