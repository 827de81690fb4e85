//! Directive output types.
//!
//! Defines the output variants that directive handlers can return.

/// Output from an opening marker.
///
/// - [`Html`](Self::Html): raw HTML nodes emitted in place of the marker, in order
/// - [`Skip`](Self::Skip): decline the marker, which then passes through unchanged
///
/// # Example
///
/// ```
/// use talon_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::html(["<section>", "<h4>Title</h4>"]);
/// assert_eq!(output.nodes().len(), 2);
///
/// let output = DirectiveOutput::Skip;
/// assert!(output.nodes().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML nodes that replace the marker.
    Html(Vec<String>),
    /// Don't handle this marker (pass through unchanged).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output from a sequence of nodes.
    #[must_use]
    pub fn html<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Html(nodes.into_iter().map(Into::into).collect())
    }

    /// Emitted nodes (empty for [`Skip`](Self::Skip)).
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        match self {
            Self::Html(nodes) => nodes,
            Self::Skip => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html() {
        let output = DirectiveOutput::html(["<p>test</p>"]);
        assert_eq!(output, DirectiveOutput::Html(vec!["<p>test</p>".to_owned()]));
    }

    #[test]
    fn test_html_from_strings() {
        let nodes = vec![String::from("<div>"), String::from("<p>x</p>")];
        let output = DirectiveOutput::html(nodes);
        assert_eq!(output.nodes(), ["<div>", "<p>x</p>"]);
    }

    #[test]
    fn test_skip() {
        let output = DirectiveOutput::Skip;
        assert_eq!(output, DirectiveOutput::Skip);
        assert!(output.nodes().is_empty());
    }
}
