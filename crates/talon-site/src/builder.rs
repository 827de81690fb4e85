//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use talon_config::Config;

use crate::page::render_page;
use crate::scanner::{SourcePage, scan_pages};
use crate::template::{self, PageData, STYLESHEET, STYLESHEET_PATH};

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// I/O error on a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Summary of a completed build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of pages written.
    pub pages: usize,
    /// Warnings from all pages, in page order.
    pub warnings: Vec<String>,
}

/// A page ready to be written.
struct BuiltPage {
    output_path: PathBuf,
    html: String,
    warnings: Vec<String>,
}

/// Builds a static documentation site from a markdown source directory.
pub struct StaticSiteBuilder<'a> {
    config: &'a Config,
}

impl<'a> StaticSiteBuilder<'a> {
    /// Create a builder for the given configuration.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render every page and write the site to the output directory.
    ///
    /// Pages are rendered in parallel. Page warnings are logged and collected
    /// in the report; they never abort the build.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing or a file cannot
    /// be read or written.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let source_dir = &self.config.docs_resolved.source_dir;
        let output_dir = &self.config.docs_resolved.output_dir;

        if !source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(source_dir.clone()));
        }

        let pages = scan_pages(source_dir);
        tracing::info!(
            pages = pages.len(),
            source = %source_dir.display(),
            "Building site"
        );

        let built: Vec<BuiltPage> = pages
            .par_iter()
            .map(|page| self.build_page(page))
            .collect::<Result<_, _>>()?;

        let mut report = BuildReport::default();
        for page in built {
            for warning in &page.warnings {
                tracing::warn!("{warning}");
            }
            write_file(&output_dir.join(&page.output_path), &page.html)?;
            report.pages += 1;
            report.warnings.extend(page.warnings);
        }

        write_file(&output_dir.join(STYLESHEET_PATH), STYLESHEET)?;

        tracing::info!(
            pages = report.pages,
            warnings = report.warnings.len(),
            output = %output_dir.display(),
            "Site built"
        );

        Ok(report)
    }

    fn build_page(&self, page: &SourcePage) -> Result<BuiltPage, BuildError> {
        let markdown = fs::read_to_string(&page.source_path).map_err(|source| BuildError::Io {
            path: page.source_path.clone(),
            source,
        })?;

        let rendered = render_page(&markdown, page, self.config);
        tracing::debug!(page = %page.rel_path, "Rendered page");

        let html = template::render_page(&PageData {
            site: &self.config.site,
            theme: &self.config.theme,
            title: &rendered.title,
            description: rendered.description.as_deref(),
            url_path: &page.url_path,
            html_content: &rendered.html,
        });

        Ok(BuiltPage {
            output_path: page.output_path.clone(),
            html,
            warnings: rendered.warnings,
        })
    }
}

/// Write a file, creating parent directories.
fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    let io_err = |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}
