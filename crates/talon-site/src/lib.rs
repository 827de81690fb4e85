//! Static site generation for Talon documentation.
//!
//! Scans a markdown source directory, renders each page with the configured
//! custom blocks, and writes the pages wrapped in the site layout.

mod builder;
mod page;
mod scanner;
mod template;

pub use builder::{BuildError, BuildReport, StaticSiteBuilder};
pub use page::{FrontMatterError, PageMeta, RenderedPage, page_renderer, render_page};
pub use scanner::{SourcePage, scan_pages};
pub use template::{STYLESHEET, STYLESHEET_PATH};
