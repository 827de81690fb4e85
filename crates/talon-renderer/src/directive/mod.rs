//! Container directives for fenced custom blocks.
//!
//! A container directive wraps a region of a document between an opening
//! marker (`::: name title`) and a closing marker (`:::`).
//!
//! # Architecture
//!
//! The [`DirectiveProcessor`] consumes the pulldown-cmark event stream of one
//! document together with the source text. Each paragraph that consists of a
//! single fence marker line is offered to the registered handlers:
//!
//! - an opening marker whose keyword matches a handler is replaced with the
//!   handler's [`start`](ContainerDirective::start) nodes;
//! - a closing marker ends the innermost open container and is replaced with
//!   the handler's [`end`](ContainerDirective::end) node;
//! - everything else, including stray closing markers and unknown keywords,
//!   passes through unchanged.
//!
//! # Example
//!
//! ```
//! use pulldown_cmark::{Event, Parser};
//! use talon_renderer::directive::{CustomBlock, DirectiveProcessor};
//!
//! let source = "::: query Failed logons\n\nCounts failures per host.\n\n:::\n";
//! let mut processor = DirectiveProcessor::new().with_container(CustomBlock::query());
//! let events = processor.process(source, Parser::new(source).into_offset_iter());
//!
//! assert_eq!(
//!     events[0],
//!     Event::Html("<div class=\"custom-block query\">\n".into())
//! );
//! assert!(processor.warnings().is_empty());
//! ```

mod args;
mod container;
mod context;
mod custom_block;
mod output;
mod parser;
mod processor;

pub use args::DirectiveArgs;
pub use container::ContainerDirective;
pub use context::DirectiveContext;
pub use custom_block::{CustomBlock, DEFAULT_QUERY_KEYWORD, DEFAULT_QUERY_TITLE};
pub use output::DirectiveOutput;
pub use parser::{FenceMarker, parse_marker};
pub(crate) use parser::starts_with_delimiter;
pub use processor::{DirectiveProcessor, DirectiveProcessorConfig};
