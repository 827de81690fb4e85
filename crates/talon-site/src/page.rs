//! Per-page rendering: front matter, markdown body, and title resolution.

use std::path::Path;

use serde::Deserialize;
use talon_config::Config;
use talon_renderer::MarkdownRenderer;
use talon_renderer::directive::CustomBlock;

use crate::scanner::SourcePage;

/// Page fields read from YAML front matter.
///
/// Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    /// Page title (overrides H1 extraction).
    #[serde(default)]
    pub title: Option<String>,
    /// Meta description (overrides the site description).
    #[serde(default)]
    pub description: Option<String>,
}

impl PageMeta {
    /// Parse front matter YAML. Empty content yields the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or not a mapping.
    pub fn from_yaml(content: &str) -> Result<Self, FrontMatterError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(|e| FrontMatterError::Parse(e.to_string()))
    }
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// YAML parsing error.
    #[error("invalid front matter: {0}")]
    Parse(String),
}

/// A rendered page body with its resolved metadata.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// Resolved page title.
    pub title: String,
    /// Page description, if set in front matter.
    pub description: Option<String>,
    /// Page body HTML.
    pub html: String,
    /// Warnings from rendering, prefixed with the page location.
    pub warnings: Vec<String>,
}

/// Create a renderer for one page of the site.
///
/// Registers one custom block per `markdown.custom_blocks` entry.
pub fn page_renderer(config: &Config, rel_path: &str) -> MarkdownRenderer {
    config.markdown.custom_blocks.iter().fold(
        MarkdownRenderer::new()
            .with_title_extraction()
            .with_base_path(config.site.base.as_str())
            .with_source_path(rel_path),
        |renderer, block| renderer.with_container(CustomBlock::new(&block.keyword, &block.title)),
    )
}

/// Render the markdown source of `page`.
///
/// The title comes from front matter, then the first H1, then the file name.
/// Invalid front matter is reported as a warning and otherwise ignored.
pub fn render_page(markdown: &str, page: &SourcePage, config: &Config) -> RenderedPage {
    let result = page_renderer(config, &page.rel_path).render_markdown(markdown);
    let mut warnings = result.warnings;

    let meta = match result.front_matter.as_deref().map(PageMeta::from_yaml) {
        Some(Ok(meta)) => meta,
        Some(Err(e)) => {
            warnings.push(format!("{}: {e}", page.rel_path));
            PageMeta::default()
        }
        None => PageMeta::default(),
    };

    let title = meta
        .title
        .or(result.title)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_title(&page.rel_path, &config.site.title));

    RenderedPage {
        title,
        description: meta.description,
        html: result.html,
        warnings,
    }
}

/// File stem, or the directory name for `index.md`, or the site title at the root.
fn fallback_title(rel_path: &str, site_title: &str) -> String {
    let path = Path::new(rel_path);
    let stem = path.file_stem().map(|s| s.to_string_lossy());
    match stem.as_deref() {
        Some("index") | None => path
            .parent()
            .and_then(Path::file_name)
            .map_or_else(|| site_title.to_owned(), |n| n.to_string_lossy().into_owned()),
        Some(stem) => stem.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::output_location;
    use pretty_assertions::assert_eq;
    use talon_config::CustomBlockConfig;

    fn source_page(rel_path: &str) -> SourcePage {
        let (url_path, output_path) = output_location(rel_path);
        SourcePage {
            source_path: Path::new("/docs").join(rel_path),
            rel_path: rel_path.to_owned(),
            url_path,
            output_path,
        }
    }

    #[test]
    fn test_page_meta_from_yaml() {
        let meta = PageMeta::from_yaml("title: DNS\ndescription: Tunnels\nlayout: doc\n").unwrap();
        assert_eq!(meta.title.as_deref(), Some("DNS"));
        assert_eq!(meta.description.as_deref(), Some("Tunnels"));
    }

    #[test]
    fn test_page_meta_empty() {
        assert_eq!(PageMeta::from_yaml("  \n").unwrap(), PageMeta::default());
    }

    #[test]
    fn test_page_meta_invalid() {
        let err = PageMeta::from_yaml("title: [unclosed").unwrap_err();
        assert!(err.to_string().starts_with("invalid front matter"));
    }

    #[test]
    fn test_render_page_query_block() {
        let config = Config::default();
        let page = source_page("queries/dns.md");
        let rendered = render_page(
            "# DNS Queries\n\n::: query\nFlags long subdomains.\n:::\n",
            &page,
            &config,
        );

        assert_eq!(rendered.title, "DNS Queries");
        assert!(rendered.html.contains(r#"<div class="custom-block query">"#));
        assert!(rendered.html.contains("Query Explanation"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn test_render_page_configured_blocks() {
        let mut config = Config::default();
        config.markdown.custom_blocks = vec![CustomBlockConfig {
            keyword: "hunt".to_owned(),
            title: "Hunting Note".to_owned(),
        }];
        let page = source_page("guide.md");
        let rendered = render_page("::: hunt\nBody\n:::\n\n::: query\nBody\n:::\n", &page, &config);

        assert!(rendered.html.contains(r#"<div class="custom-block hunt">"#));
        assert!(rendered.html.contains("Hunting Note"));
        assert!(!rendered.html.contains("custom-block query"));
    }

    #[test]
    fn test_render_page_front_matter_title_wins() {
        let config = Config::default();
        let page = source_page("guide/cicd.md");
        let rendered = render_page(
            "---\ntitle: CI/CD\ndescription: Pipelines\n---\n\n# Heading\n",
            &page,
            &config,
        );

        assert_eq!(rendered.title, "CI/CD");
        assert_eq!(rendered.description.as_deref(), Some("Pipelines"));
    }

    #[test]
    fn test_render_page_invalid_front_matter_warns() {
        let config = Config::default();
        let page = source_page("guide/cicd.md");
        let rendered = render_page("---\ntitle: [oops\n---\n\nText\n", &page, &config);

        assert_eq!(rendered.title, "cicd");
        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.warnings[0].starts_with("guide/cicd.md: invalid front matter"));
    }

    #[test]
    fn test_render_page_unclosed_warning_has_path() {
        let config = Config::default();
        let page = source_page("queries/dns.md");
        let rendered = render_page("::: query\nBody\n", &page, &config);

        assert_eq!(
            rendered.warnings,
            vec![
                "queries/dns.md:1: unclosed container directive `::: query` (missing closing :::)"
                    .to_owned()
            ]
        );
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(fallback_title("guide/architecture.md", "Talon"), "architecture");
        assert_eq!(fallback_title("queries/index.md", "Talon"), "queries");
        assert_eq!(fallback_title("index.md", "Talon"), "Talon");
    }
}
