//! Markdown renderer with custom block container directives.
//!
//! This crate wraps pulldown-cmark with one block-level extension: the
//! container directive, written as a fenced region of text:
//!
//! ```markdown
//! ::: query Hunting for renamed binaries
//! The query joins process events with file writes.
//! :::
//! ```
//!
//! # Architecture
//!
//! Rendering runs as a single pass per document:
//!
//! 1. **Segmentation** ([`isolate_fence_markers`]): fence marker lines are
//!    moved into blocks of their own so the parser reports each one as a
//!    standalone paragraph.
//! 2. **Parsing**: pulldown-cmark produces events paired with source ranges.
//! 3. **Directive pass** ([`directive::DirectiveProcessor`]): marker paragraphs
//!    owned by a registered [`directive::ContainerDirective`] are replaced with
//!    wrapper nodes; everything else passes through in order.
//! 4. **Emission**: the resulting events are written as HTML.
//!
//! # Example
//!
//! ```
//! use talon_renderer::MarkdownRenderer;
//! use talon_renderer::directive::CustomBlock;
//!
//! let markdown = "::: query\nCounts failed logons.\n:::";
//! let result = MarkdownRenderer::new()
//!     .with_container(CustomBlock::query())
//!     .render_markdown(markdown);
//!
//! assert!(result.html.contains(r#"<div class="custom-block query">"#));
//! assert!(result.html.contains("Query Explanation"));
//! ```

pub mod directive;
mod renderer;
mod segment;
mod util;

pub use renderer::{MarkdownRenderer, RenderResult};
pub use segment::{LineMap, Segmented, isolate_fence_markers};
pub use util::{escape_html, rewrite_link};
