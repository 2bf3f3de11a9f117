//! # darkcss - Dark User Styles From Live CSS
//!
//! `darkcss` downloads a site's current stylesheets, keeps the declarations
//! that carry colors, remaps every color onto a dark palette and assembles
//! the result, together with hand-written sections, into one user style.
//!
//! The heavy lifting lives in two crates:
//!
//! - [`darkcss_fetch`]: pages, stylesheet links, concurrent downloads
//! - [`darkcss_remap`]: extraction, color matching, cleanup and assembly
//!
//! This crate wires them together ([`build`]) with the compiled-in
//! [`BuildConfig`], and provides the `darkcss` binary. [`build_variants`]
//! writes the per-site override files from a [`VariantConfig`].

pub mod build;
pub mod config;
pub mod logging;
pub mod variants;

pub use build::{build, BuildReport};
pub use config::{BuildConfig, Source, VariantConfig};
pub use logging::init_logging;
pub use variants::{build_variants, SiteReport, VariantReport};

pub use darkcss_fetch;
pub use darkcss_remap;
