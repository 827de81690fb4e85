//! Fence marker parsing.
//!
//! Parses the raw text of a candidate block: `::: name title` or `:::`

use super::DirectiveArgs;

/// Minimum number of colons in a fence delimiter.
pub(crate) const DELIMITER_LEN: usize = 3;

/// A fence marker recognized in a single-line block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FenceMarker<'a> {
    /// Opening marker: `::: name title`
    Open {
        /// Directive keyword following the delimiter.
        name: &'a str,
        /// Title argument after the keyword.
        args: DirectiveArgs,
    },
    /// Closing marker: `:::`
    Close,
}

/// Parse the raw source of a block as a fence marker.
///
/// Leading blockquote markers and indentation are ignored. Returns `None` if
/// the block spans more than one line, does not start with the delimiter, or
/// the keyword contains invalid characters.
///
/// # Example
///
/// ```
/// use talon_renderer::directive::{FenceMarker, parse_marker};
///
/// let Some(FenceMarker::Open { name, args }) = parse_marker("::: query Beaconing") else {
///     panic!("expected opening marker");
/// };
/// assert_eq!(name, "query");
/// assert_eq!(args.title.as_deref(), Some("Beaconing"));
///
/// assert_eq!(parse_marker(":::"), Some(FenceMarker::Close));
/// assert_eq!(parse_marker("plain text"), None);
/// ```
#[must_use]
pub fn parse_marker(raw: &str) -> Option<FenceMarker<'_>> {
    let text = raw
        .trim_start_matches(|c: char| c == '>' || c.is_whitespace())
        .trim_end();

    if text.contains('\n') {
        return None;
    }

    let colon_count = text.chars().take_while(|&c| c == ':').count();
    if colon_count < DELIMITER_LEN {
        return None;
    }

    let after_colons = text[colon_count..].trim_start();

    if after_colons.is_empty() {
        return Some(FenceMarker::Close);
    }

    let (name, remainder) = after_colons
        .split_once(char::is_whitespace)
        .unwrap_or((after_colons, ""));

    if !is_valid_directive_name(name) {
        return None;
    }

    Some(FenceMarker::Open {
        name,
        args: DirectiveArgs::parse(remainder),
    })
}

/// Check if a line starts with the fence delimiter.
pub(crate) fn starts_with_delimiter(text: &str) -> bool {
    text.chars().take_while(|&c| c == ':').count() >= DELIMITER_LEN
}

/// Check if a name is a valid directive name.
///
/// Valid names contain only alphanumeric characters, hyphens, and underscores.
pub(crate) fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
