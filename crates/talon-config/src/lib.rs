//! Configuration management for Talon.
//!
//! Parses `talon.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base`
//! - `theme.logo`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory for the built site.
    pub output_dir: Option<PathBuf>,
    /// Override site base path.
    pub base: Option<String>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "talon.toml";

/// Keyword of the built-in custom block.
pub const DEFAULT_CUSTOM_BLOCK_KEYWORD: &str = "query";

/// Title of the built-in custom block.
pub const DEFAULT_CUSTOM_BLOCK_TITLE: &str = "Query Explanation";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Navigation and branding.
    pub theme: ThemeConfig,
    /// Markdown extensions.
    pub markdown: MarkdownConfig,
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, shown in the header and page titles.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// URL prefix the site is served under. Always starts and ends with `/`.
    pub base: String,
    /// Extra `<link>` elements for the page head.
    pub head: Vec<HeadLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Talon".to_owned(),
            description: String::new(),
            base: "/".to_owned(),
            head: Vec::new(),
        }
    }
}

/// A `<link>` element in the page head.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HeadLink {
    /// Link relation (`stylesheet`, `preconnect`, ...).
    pub rel: String,
    /// Link target.
    pub href: String,
    /// Emit a bare `crossorigin` attribute.
    #[serde(default)]
    pub crossorigin: bool,
}

/// Navigation and branding.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Logo image path, relative to the site base.
    pub logo: Option<String>,
    /// Top navigation links.
    pub nav: Vec<NavLink>,
    /// Sidebar groups.
    pub sidebar: Vec<SidebarGroup>,
    /// Icon links in the header.
    pub social_links: Vec<SocialLink>,
}

/// A labelled link.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    /// Link label.
    pub text: String,
    /// Site path (`/guide/introduction`) or external URL.
    pub link: String,
}

/// A titled group of sidebar links.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Links in the group.
    #[serde(default)]
    pub items: Vec<NavLink>,
}

/// An icon link in the header.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    /// Icon name (`github`, ...), also used as the link label.
    pub icon: String,
    /// External URL.
    pub link: String,
}

/// Markdown extensions.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Custom block container directives.
    pub custom_blocks: Vec<CustomBlockConfig>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            custom_blocks: vec![CustomBlockConfig::default()],
        }
    }
}

/// A custom block container: `::: keyword Title` ... `:::`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CustomBlockConfig {
    /// Keyword following the opening marker.
    pub keyword: String,
    /// Title used when the marker has none.
    #[serde(default = "default_custom_block_title")]
    pub title: String,
}

impl Default for CustomBlockConfig {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_CUSTOM_BLOCK_KEYWORD.to_owned(),
            title: DEFAULT_CUSTOM_BLOCK_TITLE.to_owned(),
        }
    }
}

fn default_custom_block_title() -> String {
    DEFAULT_CUSTOM_BLOCK_TITLE.to_owned()
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Directory the built site is written to.
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a custom block keyword to be a valid directive name.
fn require_keyword(keyword: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(keyword, field)?;
    if !keyword
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "{field} `{keyword}` may only contain letters, digits, `-` and `_`"
        )));
    }
    Ok(())
}

/// Ensure a base path ends with `/`.
fn normalize_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_owned()
    } else {
        format!("{base}/")
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `talon.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(base) = &settings.base {
            self.site.base = normalize_base(base);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            theme: ThemeConfig::default(),
            markdown: MarkdownConfig::default(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("dist"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        config.site.base = normalize_base(&config.site.base);

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_theme()?;
        self.validate_custom_blocks()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        if !self.site.base.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base must start with /, got `{}`",
                self.site.base
            )));
        }
        for (i, link) in self.site.head.iter().enumerate() {
            require_non_empty(&link.rel, &format!("site.head[{i}].rel"))?;
            require_non_empty(&link.href, &format!("site.head[{i}].href"))?;
        }
        Ok(())
    }

    fn validate_theme(&self) -> Result<(), ConfigError> {
        for (i, nav) in self.theme.nav.iter().enumerate() {
            require_non_empty(&nav.text, &format!("theme.nav[{i}].text"))?;
            require_non_empty(&nav.link, &format!("theme.nav[{i}].link"))?;
        }
        for (i, group) in self.theme.sidebar.iter().enumerate() {
            require_non_empty(&group.text, &format!("theme.sidebar[{i}].text"))?;
            for (j, item) in group.items.iter().enumerate() {
                let field = format!("theme.sidebar[{i}].items[{j}]");
                require_non_empty(&item.text, &format!("{field}.text"))?;
                require_non_empty(&item.link, &format!("{field}.link"))?;
            }
        }
        for (i, social) in self.theme.social_links.iter().enumerate() {
            require_non_empty(&social.icon, &format!("theme.social_links[{i}].icon"))?;
            require_non_empty(&social.link, &format!("theme.social_links[{i}].link"))?;
        }
        Ok(())
    }

    fn validate_custom_blocks(&self) -> Result<(), ConfigError> {
        let blocks = &self.markdown.custom_blocks;
        for (i, block) in blocks.iter().enumerate() {
            let field = format!("markdown.custom_blocks[{i}]");
            require_keyword(&block.keyword, &format!("{field}.keyword"))?;
            require_non_empty(&block.title, &format!("{field}.title"))?;

            if blocks[..i].iter().any(|b| b.keyword == block.keyword) {
                return Err(ConfigError::Validation(format!(
                    "{field}.keyword `{}` is defined more than once",
                    block.keyword
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;

        if let Some(ref logo) = self.theme.logo {
            self.theme.logo = Some(expand::expand_env(logo, "theme.logo")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "dist"),
        };
    }
}
