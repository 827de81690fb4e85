//! Markdown renderer with container directive support.

use std::collections::HashMap;
use std::path::Path;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::directive::{ContainerDirective, DirectiveProcessor};
use crate::segment::isolate_fence_markers;
use crate::util::rewrite_link;

/// Result of rendering markdown.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if `extract_title` was enabled).
    pub title: Option<String>,
    /// Raw YAML front matter, without the `---` delimiters.
    pub front_matter: Option<String>,
    /// Warnings generated during conversion (e.g., unclosed containers).
    pub warnings: Vec<String>,
}

/// Markdown renderer with pluggable container directives.
///
/// Each document goes through segmentation, parsing, the container directive
/// pass, and link rewriting before it is written as HTML. Headings get
/// `id` attributes derived from their text.
///
/// # Example
///
/// ```
/// use talon_renderer::MarkdownRenderer;
/// use talon_renderer::directive::CustomBlock;
///
/// let mut renderer = MarkdownRenderer::new()
///     .with_title_extraction()
///     .with_container(CustomBlock::query());
///
/// let result = renderer.render_markdown("# DNS Tunneling\n\n::: query Entropy\nLong labels.\n:::\n");
/// assert_eq!(result.title.as_deref(), Some("DNS Tunneling"));
/// assert!(result.html.contains(r#"<p class="custom-block-title">Entropy</p>"#));
/// ```
pub struct MarkdownRenderer {
    directives: DirectiveProcessor,
    base_path: Option<String>,
    extract_title: bool,
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directives: DirectiveProcessor::new(),
            base_path: None,
            extract_title: false,
            gfm: true,
        }
    }

    /// Enable title extraction from first H1 heading.
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Set the site base path for root-relative links.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Set the path of the document being rendered, used in warnings.
    #[must_use]
    pub fn with_source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.directives.set_source_path(Some(path.as_ref()));
        self
    }

    /// Register a container directive handler.
    #[must_use]
    pub fn with_container<C: ContainerDirective + 'static>(mut self, handler: C) -> Self {
        self.directives = self.directives.with_container(handler);
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    ///
    /// YAML front matter blocks and heading attributes (`{#id}`) are always
    /// recognized.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let options = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS | Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            options
                | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            options
        }
    }

    /// Render one markdown document.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let segmented = isolate_fence_markers(markdown);
        self.directives.set_line_map(segmented.line_map);

        let parser = Parser::new_ext(&segmented.text, self.parser_options()).into_offset_iter();
        let events = self.directives.process(&segmented.text, parser);

        let mut page = PageEvents::new(self.base_path.as_deref(), self.extract_title);
        let events = page.rewrite(events);

        let mut html_out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_out, events.into_iter());

        RenderResult {
            html: html_out,
            title: page.title,
            front_matter: page.front_matter,
            warnings: self.directives.take_warnings(),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-document event rewriting after the directive pass.
struct PageEvents<'b> {
    base_path: Option<&'b str>,
    extract_title: bool,
    title: Option<String>,
    front_matter: Option<String>,
    heading_ids: HashMap<String, usize>,
}

impl<'b> PageEvents<'b> {
    fn new(base_path: Option<&'b str>, extract_title: bool) -> Self {
        Self {
            base_path,
            extract_title,
            title: None,
            front_matter: None,
            heading_ids: HashMap::new(),
        }
    }

    fn rewrite<'a>(&mut self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut output = Vec::with_capacity(events.len());
        let mut events = events.into_iter();

        while let Some(event) = events.next() {
            match event {
                Event::Start(Tag::MetadataBlock(_)) => {
                    let mut yaml = String::new();
                    for inner in events.by_ref() {
                        match inner {
                            Event::End(TagEnd::MetadataBlock(_)) => break,
                            Event::Text(text) => yaml.push_str(&text),
                            _ => {}
                        }
                    }
                    self.front_matter.get_or_insert(yaml);
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    let mut inner = Vec::new();
                    let mut text = String::new();
                    for event in events.by_ref() {
                        if matches!(event, Event::End(TagEnd::Heading(_))) {
                            inner.push(event);
                            break;
                        }
                        if let Event::Text(t) | Event::Code(t) = &event {
                            text.push_str(t);
                        }
                        inner.push(self.rewrite_link(event));
                    }

                    if self.extract_title && level == HeadingLevel::H1 && self.title.is_none() {
                        self.title = Some(text.trim().to_owned());
                    }

                    let id = id.or_else(|| self.heading_id(&text).map(CowStr::from));
                    output.push(Event::Start(Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    }));
                    output.extend(inner);
                }
                other => output.push(self.rewrite_link(other)),
            }
        }

        output
    }

    fn rewrite_link<'a>(&self, event: Event<'a>) -> Event<'a> {
        match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: rewrite_link(&dest_url, self.base_path).into(),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: rewrite_link(&dest_url, self.base_path).into(),
                title,
                id,
            }),
            other => other,
        }
    }

    /// Unique anchor for a heading, or `None` if the text has no word characters.
    fn heading_id(&mut self, text: &str) -> Option<String> {
        let slug = slugify(text);
        if slug.is_empty() {
            return None;
        }
        let count = self.heading_ids.entry(slug.clone()).or_insert(0);
        let id = if *count == 0 {
            slug
        } else {
            format!("{slug}-{count}")
        };
        *count += 1;
        Some(id)
    }
}

/// Lowercase, hyphen-separated anchor text.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
