//! Directive argument parsing.
//!
//! Parses the free-text remainder of an opening marker: `::: name [title]`.

/// Parsed arguments from an opening fence marker.
///
/// # Example
///
/// ```
/// use talon_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("  Lateral movement via SMB  ");
/// assert_eq!(args.title.as_deref(), Some("Lateral movement via SMB"));
///
/// let args = DirectiveArgs::parse("   ");
/// assert_eq!(args.title, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Title text following the keyword, trimmed. `None` if blank.
    pub title: Option<String>,
}

impl DirectiveArgs {
    /// Parse the remainder of a marker line after the keyword.
    #[must_use]
    pub fn parse(remainder: &str) -> Self {
        let title = remainder.trim();
        Self {
            title: (!title.is_empty()).then(|| title.to_owned()),
        }
    }

    /// Title text, or `default` when no title was given.
    #[must_use]
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }

    /// Reconstruct the marker remainder.
    ///
    /// Used for warnings that quote the original marker.
    #[must_use]
    pub fn to_syntax(&self) -> String {
        self.title
            .as_ref()
            .map_or_else(String::new, |title| format!(" {title}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args() {
        let args = DirectiveArgs::parse("");
        assert_eq!(args.title, None);
    }

    #[test]
    fn test_whitespace_only_is_no_title() {
        let args = DirectiveArgs::parse(" \t ");
        assert_eq!(args.title, None);
    }

    #[test]
    fn test_title_is_trimmed() {
        let args = DirectiveArgs::parse("   Beaconing hosts \t");
        assert_eq!(args.title.as_deref(), Some("Beaconing hosts"));
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        let args = DirectiveArgs::parse("a  b   c");
        assert_eq!(args.title.as_deref(), Some("a  b   c"));
    }

    #[test]
    fn test_title_or_default() {
        assert_eq!(DirectiveArgs::parse("").title_or("Fallback"), "Fallback");
        assert_eq!(DirectiveArgs::parse("Given").title_or("Fallback"), "Given");
    }

    #[test]
    fn test_to_syntax() {
        assert_eq!(DirectiveArgs::parse("").to_syntax(), "");
        assert_eq!(DirectiveArgs::parse("Title").to_syntax(), " Title");
    }
}
