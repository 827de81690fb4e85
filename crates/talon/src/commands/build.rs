//! `talon build` command implementation.

use std::path::PathBuf;

use clap::Args;
use talon_config::{CliSettings, Config};
use talon_site::StaticSiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// URL prefix the site is served under (overrides config).
    #[arg(long, env = "TALON_BASE")]
    base: Option<String>,

    /// Path to configuration file (default: auto-discover talon.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            base: self.base,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        tracing::info!(
            config = ?config.config_path,
            source = %config.docs_resolved.source_dir.display(),
            output = %config.docs_resolved.output_dir.display(),
            base = %config.site.base,
            "Loaded configuration"
        );

        let report = StaticSiteBuilder::new(&config).build()?;

        output.warnings(&report.warnings);
        output.built(
            report.pages,
            report.warnings.len(),
            &config.docs_resolved.output_dir.display().to_string(),
        );
        Ok(())
    }
}
