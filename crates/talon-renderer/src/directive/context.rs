//! Directive processing context.
//!
//! Provides source location information to directive handlers.

use std::path::Path;

/// Context provided to directive handlers for source location.
///
/// The context is created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// marker and provides the source file (if known) and the line of the marker.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use talon_renderer::directive::DirectiveContext;
///
/// let ctx = DirectiveContext {
///     source_path: Some(Path::new("queries/lateral-movement.md")),
///     line: 12,
/// };
///
/// assert_eq!(ctx.location(), "queries/lateral-movement.md:12");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DirectiveContext<'a> {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<&'a Path>,
    /// Line number where the marker appears (1-indexed).
    pub line: usize,
}

impl DirectiveContext<'_> {
    /// Human-readable location of the marker for messages.
    #[must_use]
    pub fn location(&self) -> String {
        match self.source_path {
            Some(path) => format!("{}:{}", path.display(), self.line),
            None => format!("line {}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_with_path() {
        let ctx = DirectiveContext {
            source_path: Some(Path::new("docs/guide.md")),
            line: 3,
        };
        assert_eq!(ctx.location(), "docs/guide.md:3");
    }

    #[test]
    fn test_location_without_path() {
        let ctx = DirectiveContext {
            source_path: None,
            line: 7,
        };
        assert_eq!(ctx.location(), "line 7");
    }
}
