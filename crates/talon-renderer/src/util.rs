//! Shared utility functions for markdown rendering.

/// Escape text for use in HTML content and attribute values.
///
/// # Examples
///
/// ```
/// use talon_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b && \"c\""), "a &lt; b &amp;&amp; &quot;c&quot;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rewrite a link destination for the built site.
///
/// Links to markdown sources point at the generated HTML page instead, and
/// root-relative links are prefixed with the site base path. External links,
/// `mailto:` links, and in-page anchors are returned unchanged.
///
/// # Examples
///
/// ```
/// use talon_renderer::rewrite_link;
///
/// assert_eq!(rewrite_link("cicd.md#gitlab", None), "cicd.html#gitlab");
/// assert_eq!(
///     rewrite_link("/guide/introduction", Some("/talon/")),
///     "/talon/guide/introduction"
/// );
/// assert_eq!(rewrite_link("https://example.com/a.md", Some("/talon/")), "https://example.com/a.md");
/// ```
#[must_use]
pub fn rewrite_link(dest: &str, base: Option<&str>) -> String {
    if is_external(dest) || dest.starts_with('#') {
        return dest.to_owned();
    }

    let split = dest.find(['#', '?']).unwrap_or(dest.len());
    let (path, suffix) = dest.split_at(split);

    let path = match path.strip_suffix(".md") {
        Some(stem) => format!("{stem}.html"),
        None => path.to_owned(),
    };

    match base {
        Some(base) if path.starts_with('/') => {
            format!("{}{path}{suffix}", base.trim_end_matches('/'))
        }
        _ => format!("{path}{suffix}"),
    }
}

fn is_external(dest: &str) -> bool {
    dest.contains("://") || dest.starts_with("//") || dest.starts_with("mailto:")
}
