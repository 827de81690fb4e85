//! Styled custom block container.
//!
//! Renders `::: query Title` ... `:::` as:
//!
//! ```html
//! <div class="custom-block query">
//! <p class="custom-block-title">Title</p>
//! ...body...
//! </div>
//! ```

use crate::util::escape_html;

use super::{ContainerDirective, DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Keyword of the query explanation block.
pub const DEFAULT_QUERY_KEYWORD: &str = "query";

/// Title used when a query explanation block has no title of its own.
pub const DEFAULT_QUERY_TITLE: &str = "Query Explanation";

/// Container directive that wraps its body in a titled custom block.
///
/// The wrapper carries two classes, `custom-block` and the keyword, and is
/// followed by a `custom-block-title` paragraph holding the title argument or
/// the configured default.
///
/// # Example
///
/// ```
/// use talon_renderer::directive::{
///     ContainerDirective, CustomBlock, DirectiveArgs, DirectiveContext,
/// };
///
/// let mut block = CustomBlock::new("warning", "Warning");
/// let ctx = DirectiveContext { source_path: None, line: 1 };
/// let output = block.start(DirectiveArgs::parse(""), &ctx);
///
/// assert_eq!(
///     output.nodes(),
///     [
///         "<div class=\"custom-block warning\">\n",
///         "<p class=\"custom-block-title\">Warning</p>\n",
///     ]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomBlock {
    keyword: String,
    default_title: String,
}

impl CustomBlock {
    /// Create a custom block for `keyword` with a fallback title.
    #[must_use]
    pub fn new(keyword: impl Into<String>, default_title: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            default_title: default_title.into(),
        }
    }

    /// The query explanation block: `::: query`, titled "Query Explanation".
    #[must_use]
    pub fn query() -> Self {
        Self::new(DEFAULT_QUERY_KEYWORD, DEFAULT_QUERY_TITLE)
    }

    /// Keyword this block is registered under.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Title used when the marker has none.
    #[must_use]
    pub fn default_title(&self) -> &str {
        &self.default_title
    }
}

impl Default for CustomBlock {
    fn default() -> Self {
        Self::query()
    }
}

impl ContainerDirective for CustomBlock {
    fn name(&self) -> &str {
        &self.keyword
    }

    fn start(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext<'_>) -> DirectiveOutput {
        let title = args.title_or(&self.default_title);
        DirectiveOutput::html([
            format!(
                "<div class=\"custom-block {}\">\n",
                escape_html(&self.keyword)
            ),
            format!(
                "<p class=\"custom-block-title\">{}</p>\n",
                escape_html(title)
            ),
        ])
    }

    fn end(&mut self, _line: usize) -> Option<String> {
        Some("</div>\n".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> DirectiveContext<'static> {
        DirectiveContext {
            source_path: None,
            line: 1,
        }
    }

    #[test]
    fn test_query_defaults() {
        let block = CustomBlock::query();
        assert_eq!(block.keyword(), "query");
        assert_eq!(block.default_title(), "Query Explanation");
        assert_eq!(block, CustomBlock::default());
    }

    #[test]
    fn test_start_with_title() {
        let mut block = CustomBlock::query();
        let output = block.start(DirectiveArgs::parse("Kerberoasting"), &ctx());

        assert_eq!(
            output.nodes(),
            [
                "<div class=\"custom-block query\">\n",
                "<p class=\"custom-block-title\">Kerberoasting</p>\n",
            ]
        );
    }

    #[test]
    fn test_start_blank_title_uses_default() {
        let mut block = CustomBlock::query();
        let output = block.start(DirectiveArgs::parse("   "), &ctx());

        assert_eq!(
            output.nodes()[1],
            "<p class=\"custom-block-title\">Query Explanation</p>\n"
        );
    }

    #[test]
    fn test_custom_default_title() {
        let mut block = CustomBlock::new("query", "How this query works");
        let output = block.start(DirectiveArgs::default(), &ctx());

        assert!(output.nodes()[1].contains("How this query works"));
    }

    #[test]
    fn test_title_escaped() {
        let mut block = CustomBlock::query();
        let output = block.start(DirectiveArgs::parse("a < b"), &ctx());

        assert_eq!(
            output.nodes()[1],
            "<p class=\"custom-block-title\">a &lt; b</p>\n"
        );
    }

    #[test]
    fn test_end() {
        let mut block = CustomBlock::query();
        assert_eq!(block.end(5), Some("</div>\n".to_owned()));
    }
}
