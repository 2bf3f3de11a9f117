use anyhow::Result;
use clap::{Parser, Subcommand};
use darkcss::darkcss_fetch::HttpFetcher;
use darkcss::{build, build_variants, init_logging, BuildConfig, VariantConfig};
use tracing::info;

/// Generate the dark user style from the live site's CSS.
///
/// Fetch settings and paths are compiled in. Set RUST_LOG to change the log
/// level.
#[derive(Debug, Parser)]
#[command(name = "darkcss", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the user style (the default)
    Build,
    /// Write per-site overrides for declarations too dim on a dark background
    Variants,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    let fetcher = HttpFetcher::new()?;

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = BuildConfig::default();
            let report = build(&config, &fetcher)?;
            info!(
                stylesheets = report.stylesheets,
                tokens = report.tokens,
                rules = report.rules,
                "generated {}",
                config.output_file.display()
            );
        }
        Command::Variants => {
            let config = VariantConfig::default();
            let report = build_variants(&config, &fetcher)?;
            info!(
                sites = report.sites.len(),
                "generated {}",
                config.combined_file.display()
            );
        }
    }
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
