//! HTML page layout for static site generation.
//!
//! Wraps rendered page bodies with the site header, navigation, and sidebar
//! configured in `talon.toml`.

use std::fmt::Write;

use talon_config::{HeadLink, NavLink, SidebarGroup, SiteConfig, SocialLink, ThemeConfig};
use talon_renderer::escape_html as escape;

/// Path of the stylesheet relative to the site base.
pub const STYLESHEET_PATH: &str = "assets/style.css";

/// Stylesheet written alongside the pages.
pub const STYLESHEET: &str = r#":root {
  --talon-font: "Heebo", system-ui, sans-serif;
  --talon-heading-font: "Oxanium", var(--talon-font);
  --talon-border: #e2e2e3;
  --talon-accent: #3451b2;
  --talon-block-bg: #f6f6f7;
}
body { margin: 0; font-family: var(--talon-font); color: #213547; }
h1, h2, h3, .site-title { font-family: var(--talon-heading-font); }
.site-header { display: flex; align-items: center; gap: 1.5rem; padding: 0 1.5rem; height: 64px; border-bottom: 1px solid var(--talon-border); }
.site-title { display: flex; align-items: center; gap: 0.5rem; font-weight: 600; color: inherit; text-decoration: none; }
.site-title img { height: 24px; }
.site-nav { display: flex; gap: 1rem; margin-left: auto; }
.site-nav a, .social-link { color: inherit; text-decoration: none; }
.site-nav a.active { color: var(--talon-accent); }
.site-layout { display: flex; }
.site-sidebar { width: 272px; flex-shrink: 0; padding: 1.5rem; border-right: 1px solid var(--talon-border); }
.sidebar-group-title { font-weight: 700; margin: 0 0 0.5rem; }
.sidebar-group ul { list-style: none; padding: 0; margin: 0 0 1.5rem; }
.sidebar-group a { display: block; padding: 0.25rem 0; color: #3c3c43; text-decoration: none; }
.sidebar-group a.active { color: var(--talon-accent); font-weight: 500; }
.site-content { flex: 1; min-width: 0; max-width: 860px; padding: 2rem 3rem; }
.custom-block { border: 1px solid transparent; border-radius: 8px; padding: 16px 16px 8px; margin: 16px 0; background-color: var(--talon-block-bg); }
.custom-block.query { border-color: var(--talon-accent); }
.custom-block-title { font-weight: 600; margin: 0 0 8px; }
.custom-block > p:last-child { margin-bottom: 8px; }
"#;

/// All data needed to render a static page.
pub struct PageData<'a> {
    /// Site metadata.
    pub site: &'a SiteConfig,
    /// Navigation and branding.
    pub theme: &'a ThemeConfig,
    /// Page title.
    pub title: &'a str,
    /// Page description, falling back to the site description.
    pub description: Option<&'a str>,
    /// URL path of the page relative to the site base.
    pub url_path: &'a str,
    /// Rendered page body.
    pub html_content: &'a str,
}

/// Render a complete static HTML page.
pub fn render_page(page: &PageData<'_>) -> String {
    let base = page.site.base.as_str();
    let current = format!("{base}{}", page.url_path);
    let mut html = String::with_capacity(page.html_content.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en-US\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&document_title(page)));
    let description = page.description.unwrap_or(&page.site.description);
    if !description.is_empty() {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }
    render_head_links(&mut html, &page.site.head);
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"{}\">",
        escape(&format!("{base}{STYLESHEET_PATH}"))
    );
    html.push_str("</head>\n<body>\n");

    render_header(&mut html, page, &current);

    html.push_str("<div class=\"site-layout\">\n");
    render_sidebar(&mut html, &page.theme.sidebar, base, &current);
    html.push_str("<main class=\"site-content\">\n<article class=\"vp-doc\">\n");
    html.push_str(page.html_content);
    html.push_str("</article>\n</main>\n</div>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// `Page | Site`, or just the site title when they match.
fn document_title(page: &PageData<'_>) -> String {
    if page.title == page.site.title {
        page.site.title.clone()
    } else {
        format!("{} | {}", page.title, page.site.title)
    }
}

fn render_head_links(html: &mut String, links: &[HeadLink]) {
    for link in links {
        let _ = writeln!(
            html,
            "<link rel=\"{}\" href=\"{}\"{}>",
            escape(&link.rel),
            escape(&link.href),
            if link.crossorigin { " crossorigin" } else { "" }
        );
    }
}

fn render_header(html: &mut String, page: &PageData<'_>, current: &str) {
    let base = page.site.base.as_str();

    html.push_str("<header class=\"site-header\">\n");
    let _ = write!(html, "<a class=\"site-title\" href=\"{}\">", escape(base));
    if let Some(logo) = &page.theme.logo {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"\">",
            escape(&resolve_link(base, logo))
        );
    }
    let _ = writeln!(html, "<span>{}</span></a>", escape(&page.site.title));

    if !page.theme.nav.is_empty() {
        html.push_str("<nav class=\"site-nav\">\n");
        for item in &page.theme.nav {
            render_link(html, item, base, current);
        }
        html.push_str("</nav>\n");
    }

    render_social_links(html, &page.theme.social_links);
    html.push_str("</header>\n");
}

fn render_social_links(html: &mut String, links: &[SocialLink]) {
    for link in links {
        let _ = writeln!(
            html,
            "<a class=\"social-link\" href=\"{}\" aria-label=\"{icon}\" target=\"_blank\" rel=\"noopener\">{icon}</a>",
            escape(&link.link),
            icon = escape(&link.icon),
        );
    }
}

fn render_sidebar(html: &mut String, groups: &[SidebarGroup], base: &str, current: &str) {
    if groups.is_empty() {
        return;
    }
    html.push_str("<aside class=\"site-sidebar\">\n<nav>\n");
    for group in groups {
        html.push_str("<section class=\"sidebar-group\">\n");
        let _ = writeln!(
            html,
            "<p class=\"sidebar-group-title\">{}</p>",
            escape(&group.text)
        );
        html.push_str("<ul>\n");
        for item in &group.items {
            html.push_str("<li>");
            render_link(html, item, base, current);
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n</section>\n");
    }
    html.push_str("</nav>\n</aside>\n");
}

fn render_link(html: &mut String, item: &NavLink, base: &str, current: &str) {
    let href = resolve_link(base, &item.link);
    let active = if href == current { " class=\"active\"" } else { "" };
    let _ = writeln!(
        html,
        "<a href=\"{}\"{active}>{}</a>",
        escape(&href),
        escape(&item.text)
    );
}

/// Resolve a configured link against the site base.
///
/// Root-relative page links get the base prefix, and `.html` is appended
/// when the last segment has no extension. External and relative links are
/// returned unchanged.
pub(crate) fn resolve_link(base: &str, link: &str) -> String {
    let Some(path) = link.strip_prefix('/') else {
        return link.to_owned();
    };
    if link.starts_with("//") {
        return link.to_owned();
    }

    let last = path.rsplit('/').next().unwrap_or_default();
    if last.is_empty() || last.contains('.') {
        format!("{base}{path}")
    } else {
        format!("{base}{path}.html")
    }
}
