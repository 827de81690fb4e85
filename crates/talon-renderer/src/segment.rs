//! Block segmentation for fence marker lines.
//!
//! CommonMark folds adjacent lines into one paragraph, so a marker written
//! directly above its body would be parsed together with it:
//!
//! ```markdown
//! ::: query
//! Body text
//! :::
//! ```
//!
//! [`isolate_fence_markers`] surrounds every fence marker line with separator
//! lines so that each marker becomes a paragraph of its own.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::directive::starts_with_delimiter;

/// Text produced by segmentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segmented {
    /// Markdown with fence markers isolated.
    pub text: String,
    /// Maps lines of `text` back to lines of the input.
    pub line_map: LineMap,
}

/// Maps line numbers of segmented text back to the input.
///
/// # Example
///
/// ```
/// use talon_renderer::LineMap;
///
/// // Line 2 of the segmented text was inserted.
/// let map = LineMap::new(vec![2]);
/// assert_eq!(map.original_line(1), 1);
/// assert_eq!(map.original_line(3), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMap {
    /// Inserted line numbers (1-indexed, ascending).
    inserted: Vec<usize>,
}

impl LineMap {
    /// Create a map from the ascending list of inserted line numbers.
    #[must_use]
    pub fn new(inserted: Vec<usize>) -> Self {
        debug_assert!(inserted.windows(2).all(|w| w[0] < w[1]));
        Self { inserted }
    }

    /// Line of the input that `line` of the segmented text came from.
    ///
    /// Inserted lines map to the input line before them.
    #[must_use]
    pub fn original_line(&self, line: usize) -> usize {
        let shifted = self.inserted.partition_point(|&l| l <= line);
        line.saturating_sub(shifted).max(1)
    }

    /// Number of inserted lines.
    #[must_use]
    pub fn inserted_count(&self) -> usize {
        self.inserted.len()
    }
}

/// Move fence marker lines into blocks of their own.
///
/// Every line whose content starts with `:::` gets a separator line before
/// and after it unless the neighbouring line is already blank. Content may
/// follow a blockquote prefix or a list item marker; separators repeat the
/// blockquote prefix so quoted markers stay inside their quote.
///
/// Lines inside code blocks (fenced or indented), raw HTML blocks and front
/// matter are left alone, as are lines indented four or more spaces.
///
/// # Example
///
/// ```
/// use talon_renderer::isolate_fence_markers;
///
/// let segmented = isolate_fence_markers("::: query\nBody\n:::\n");
/// assert_eq!(segmented.text, "::: query\n\nBody\n\n:::\n");
/// assert_eq!(segmented.line_map.inserted_count(), 2);
/// ```
#[must_use]
pub fn isolate_fence_markers(input: &str) -> Segmented {
    let lines = split_lines(input);
    let opaque = opaque_blocks(input);
    let mut opaque = opaque.iter().peekable();
    let mut writer = LineWriter::with_capacity(input.len() + 16);

    for (idx, (span, line)) in lines.iter().enumerate() {
        while opaque.next_if(|block| block.end <= span.start).is_some() {}
        let in_block = opaque.peek().is_some_and(|block| block.start < span.end);

        let Some(prefix) = (!in_block).then(|| marker_prefix(line)).flatten() else {
            writer.line(line);
            continue;
        };

        if idx > 0 && !writer.last_blank {
            writer.separator(prefix);
        }
        writer.line(line);
        if lines.get(idx + 1).is_some_and(|(_, next)| !is_blank(next)) {
            writer.separator(prefix);
        }
    }

    let mut text = writer.out;
    if !input.ends_with('\n') && text.ends_with('\n') {
        text.pop();
    }

    Segmented {
        text,
        line_map: LineMap::new(writer.inserted),
    }
}

/// Lines of `input` with their byte spans, line endings excluded.
fn split_lines(input: &str) -> Vec<(Range<usize>, &str)> {
    let mut start = 0;
    input
        .split_inclusive('\n')
        .map(|chunk| {
            let line = chunk.strip_suffix('\n').unwrap_or(chunk);
            let line = line.strip_suffix('\r').unwrap_or(line);
            let span = start..start + line.len();
            start += chunk.len();
            (span, line)
        })
        .collect()
}

/// Source ranges of blocks whose lines are never markers: code blocks, raw
/// HTML blocks and front matter. Ranges are ascending and disjoint.
fn opaque_blocks(input: &str) -> Vec<Range<usize>> {
    Parser::new_ext(input, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_) | Tag::HtmlBlock | Tag::MetadataBlock(_)) => Some(range),
            _ => None,
        })
        .collect()
}

/// Blockquote prefix of a fence marker line, or `None` if not a marker.
fn marker_prefix(line: &str) -> Option<&str> {
    let quote_end = line
        .char_indices()
        .take_while(|&(_, c)| c == '>' || c == ' ' || c == '\t')
        .filter(|&(_, c)| c == '>')
        .last()
        .map_or(0, |(i, _)| i + 1);

    let rest = &line[quote_end..];
    let indent = rest.chars().take_while(|&c| c == ' ').count();
    // One space after `>` belongs to the blockquote marker.
    let indent = if quote_end > 0 {
        indent.saturating_sub(1)
    } else {
        indent
    };
    if indent >= 4 {
        return None;
    }

    let mut content = rest.trim_start();
    while let Some(width) = list_marker_width(content) {
        content = &content[width..];
    }

    starts_with_delimiter(content).then(|| line[..quote_end].trim_end())
}

/// Width of a list item marker (`-`, `*`, `+`, `1.`, `1)`) at the start of
/// `content`, including the spaces after it.
fn list_marker_width(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    let marker = match bytes.first()? {
        b'-' | b'*' | b'+' => 1,
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 || !matches!(bytes.get(digits), Some(b'.' | b')')) {
                return None;
            }
            digits + 1
        }
        _ => return None,
    };
    let spaces = bytes[marker..].iter().take_while(|&&b| b == b' ').count();
    (spaces > 0).then_some(marker + spaces)
}

/// A line with nothing but whitespace and blockquote markers.
fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == '>' || c.is_whitespace())
}

struct LineWriter {
    out: String,
    written: usize,
    inserted: Vec<usize>,
    last_blank: bool,
}

impl LineWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            written: 0,
            inserted: Vec::new(),
            last_blank: false,
        }
    }

    fn line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
        self.written += 1;
        self.last_blank = is_blank(line);
    }

    fn separator(&mut self, prefix: &str) {
        self.line(prefix);
        self.inserted.push(self.written);
    }
}
