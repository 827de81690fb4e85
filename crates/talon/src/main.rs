//! Talon CLI - documentation site builder.
//!
//! Provides commands for:
//! - `build`: Render the markdown source directory into a static site
//! - `render`: Render one markdown file's body HTML to stdout

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RenderArgs};
use output::Output;

/// Talon - documentation site builder.
#[derive(Parser)]
#[command(name = "talon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static documentation site.
    Build(BuildArgs),
    /// Render a single markdown file to HTML on stdout.
    Render(RenderArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose,
            Self::Render(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "talon",
            "build",
            "--source-dir",
            "docs",
            "--base",
            "/talon_hunt_framework_docs/",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn parse_render_requires_file() {
        assert!(Cli::try_parse_from(["talon", "render"]).is_err());
        let cli = Cli::try_parse_from(["talon", "render", "docs/index.md"]).unwrap();
        assert!(!cli.command.verbose());
    }
}
