//! `talon render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use talon_config::Config;
use talon_site::page_renderer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover talon.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        tracing::debug!(file = %self.file.display(), "Rendering file");
        let (html, warnings) = render_file(&self.file, &config)?;

        Output::new().warnings(&warnings);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Render one file's body HTML with the configured custom blocks.
fn render_file(path: &Path, config: &Config) -> Result<(String, Vec<String>), CliError> {
    let markdown = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let display = path.to_string_lossy();
    let result = page_renderer(config, &display).render_markdown(&markdown);
    Ok((result.html, result.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_file_uses_configured_blocks() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("page.md");
        std::fs::write(&path, "::: query Beaconing\nRegular intervals.\n:::\n").unwrap();

        let (html, warnings) = render_file(&path, &Config::default()).unwrap();

        assert!(html.starts_with("<div class=\"custom-block query\">\n"));
        assert!(html.contains("<p class=\"custom-block-title\">Beaconing</p>"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn render_file_reports_unclosed_block() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("page.md");
        std::fs::write(&path, "::: query\nBody\n").unwrap();

        let (_, warnings) = render_file(&path, &Config::default()).unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("page.md:1: unclosed container directive"));
    }

    #[test]
    fn render_file_missing() {
        let err = render_file(Path::new("/nonexistent/page.md"), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/page.md"));
    }
}
