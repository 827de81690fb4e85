//! Directive processor for fenced container directives.
//!
//! Rewrites the pulldown-cmark event stream of one document, replacing fence
//! marker paragraphs owned by registered handlers with their output nodes.

use std::ops::Range;
use std::path::{Path, PathBuf};

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use crate::segment::LineMap;

use super::parser::{FenceMarker, parse_marker};
use super::{ContainerDirective, DirectiveContext, DirectiveOutput};

/// Configuration for the directive processor.
#[derive(Debug, Default)]
pub struct DirectiveProcessorConfig {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<PathBuf>,
    /// Maps lines of the processed text back to the author's source.
    pub line_map: LineMap,
}

impl DirectiveProcessorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source file path.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Set the line map for text produced by segmentation.
    #[must_use]
    pub fn with_line_map(mut self, line_map: LineMap) -> Self {
        self.line_map = line_map;
        self
    }

    fn create_context(&self, line: usize) -> DirectiveContext<'_> {
        DirectiveContext {
            source_path: self.source_path.as_deref(),
            line,
        }
    }
}

/// An accepted opening marker waiting for its closing marker.
#[derive(Debug)]
struct OpenContainer {
    handler: usize,
    line: usize,
    syntax: String,
}

/// Processor for fenced container directives.
///
/// Nesting is tracked with a stack of accepted openings: a closing marker
/// ends the innermost open container, and a closing marker with nothing open
/// is left as ordinary content. Openings still unclosed at the end of the
/// document produce a warning and are not closed implicitly.
///
/// # Example
///
/// ```
/// use pulldown_cmark::{Event, Parser};
/// use talon_renderer::directive::{CustomBlock, DirectiveProcessor};
///
/// let source = "::: query\n\nBody\n";
/// let mut processor = DirectiveProcessor::new().with_container(CustomBlock::query());
/// let events = processor.process(source, Parser::new(source).into_offset_iter());
///
/// assert!(!events.contains(&Event::Html("</div>\n".into())));
/// assert_eq!(processor.warnings().len(), 1);
/// ```
pub struct DirectiveProcessor {
    config: DirectiveProcessorConfig,
    container_handlers: Vec<Box<dyn ContainerDirective>>,
    /// Stack of accepted openings for dispatching `end()` calls.
    active_containers: Vec<OpenContainer>,
    warnings: Vec<String>,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    /// Create a new directive processor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DirectiveProcessorConfig::default())
    }

    /// Create a new directive processor with custom configuration.
    #[must_use]
    pub fn with_config(config: DirectiveProcessorConfig) -> Self {
        Self {
            config,
            container_handlers: Vec::new(),
            active_containers: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Register a container directive handler.
    ///
    /// The first handler registered for a keyword wins.
    #[must_use]
    pub fn with_container<D: ContainerDirective + 'static>(mut self, handler: D) -> Self {
        self.container_handlers.push(Box::new(handler));
        self
    }

    /// Set the source file path used in contexts and warnings.
    pub fn set_source_path(&mut self, source_path: Option<&Path>) {
        self.config.source_path = source_path.map(Path::to_path_buf);
    }

    /// Set the line map for the next document.
    pub fn set_line_map(&mut self, line_map: LineMap) {
        self.config.line_map = line_map;
    }

    /// Check whether a handler is registered for `name`.
    #[must_use]
    pub fn handles(&self, name: &str) -> bool {
        self.container_handlers.iter().any(|h| h.name() == name)
    }

    /// Rewrite the events of one document.
    ///
    /// `events` must be the offset iterator of a parser over `source`; ranges
    /// are used to read the raw text of candidate blocks.
    pub fn process<'a, I>(&mut self, source: &'a str, events: I) -> Vec<Event<'a>>
    where
        I: IntoIterator<Item = (Event<'a>, Range<usize>)>,
    {
        let mut events = events.into_iter();
        let mut output = Vec::new();
        let mut lines = LineCounter::new(source);

        while let Some((event, range)) = events.next() {
            if !matches!(event, Event::Start(Tag::Paragraph)) {
                output.push(event);
                continue;
            }

            let Some(marker) = source.get(range.clone()).and_then(parse_marker) else {
                output.push(event);
                continue;
            };

            let line = self.config.line_map.original_line(lines.line_at(range.start));
            match self.dispatch(marker, line) {
                Some(nodes) => {
                    // Drop the marker paragraph; it has no nested paragraphs.
                    for (inner, _) in events.by_ref() {
                        if matches!(inner, Event::End(TagEnd::Paragraph)) {
                            break;
                        }
                    }
                    output.extend(nodes.into_iter().map(|node| Event::Html(CowStr::from(node))));
                }
                None => output.push(event),
            }
        }

        self.finalize();

        output
    }

    /// Dispatch a marker, returning replacement nodes if it was consumed.
    fn dispatch(&mut self, marker: FenceMarker<'_>, line: usize) -> Option<Vec<String>> {
        match marker {
            FenceMarker::Open { name, args } => {
                let idx = self
                    .container_handlers
                    .iter()
                    .position(|h| h.name() == name)?;

                let syntax = format!("::: {name}{}", args.to_syntax());
                let ctx = self.config.create_context(line);
                match self.container_handlers[idx].start(args, &ctx) {
                    DirectiveOutput::Html(nodes) => {
                        self.active_containers.push(OpenContainer {
                            handler: idx,
                            line,
                            syntax,
                        });
                        Some(nodes)
                    }
                    DirectiveOutput::Skip => None,
                }
            }
            FenceMarker::Close => {
                // Stray closing markers stay in the document as text.
                let open = self.active_containers.pop()?;
                Some(
                    self.container_handlers[open.handler]
                        .end(line)
                        .into_iter()
                        .collect(),
                )
            }
        }
    }

    fn finalize(&mut self) {
        for open in self.active_containers.drain(..) {
            let ctx = self.config.create_context(open.line);
            self.warnings.push(format!(
                "{}: unclosed container directive `{}` (missing closing :::)",
                ctx.location(),
                open.syntax
            ));
        }
    }

    /// Get warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Take warnings generated so far, leaving none behind.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

/// Incremental byte offset to line number conversion.
///
/// Offsets must be queried in non-decreasing order for linear cost; an
/// earlier offset restarts counting from the beginning.
struct LineCounter<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        if offset < self.offset {
            self.offset = 0;
            self.line = 1;
        }
        let end = offset.min(self.source.len());
        self.line += self.source.as_bytes()[self.offset..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = end;
        self.line
    }
}
