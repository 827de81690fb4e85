//! Container directive trait.
//!
//! Container directives use triple-colon syntax: `::: name title` ... `:::`

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Handler for container directives: `::: name title` ... `:::`
///
/// Container directives wrap arbitrary content and have start/end phases.
/// The [`DirectiveProcessor`](super::DirectiveProcessor) tracks nesting and only
/// calls [`end`](Self::end) for a container whose [`start`](Self::start) was
/// accepted.
///
/// # Thread Safety
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its own
/// processor instance.
///
/// # Example
///
/// ```
/// use talon_renderer::directive::{
///     ContainerDirective, DirectiveArgs, DirectiveContext, DirectiveOutput,
/// };
///
/// struct NoteDirective;
///
/// impl ContainerDirective for NoteDirective {
///     fn name(&self) -> &str { "note" }
///
///     fn start(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext<'_>) -> DirectiveOutput {
///         let title = args.title_or("Note");
///         DirectiveOutput::html([
///             r#"<aside class="note">"#.to_owned(),
///             format!("<strong>{title}</strong>"),
///         ])
///     }
///
///     fn end(&mut self, _line: usize) -> Option<String> {
///         Some("</aside>".to_owned())
///     }
/// }
/// ```
pub trait ContainerDirective: Send {
    /// Directive keyword (e.g., "query").
    ///
    /// This is matched against the first word after the delimiter: `::: query`
    fn name(&self) -> &str;

    /// Handle an opening marker `::: name title`.
    ///
    /// Returns:
    /// - [`DirectiveOutput::Html`] with the nodes that replace the marker
    /// - [`DirectiveOutput::Skip`] to pass the marker through unhandled
    fn start(&mut self, args: DirectiveArgs, ctx: &DirectiveContext<'_>) -> DirectiveOutput;

    /// Handle the closing marker `:::` of an accepted container.
    ///
    /// Returns the closing node, or `None` to emit nothing.
    fn end(&mut self, line: usize) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestDetails {
        depth: usize,
    }

    impl ContainerDirective for TestDetails {
        fn name(&self) -> &'static str {
            "details"
        }

        fn start(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext<'_>) -> DirectiveOutput {
            self.depth += 1;
            DirectiveOutput::html([format!(
                "<details><summary>{}</summary>",
                args.title_or("Details")
            )])
        }

        fn end(&mut self, _line: usize) -> Option<String> {
            self.depth -= 1;
            Some("</details>".to_owned())
        }
    }

    fn ctx() -> DirectiveContext<'static> {
        DirectiveContext {
            source_path: None,
            line: 1,
        }
    }

    #[test]
    fn test_container_start() {
        let mut details = TestDetails { depth: 0 };
        let output = details.start(DirectiveArgs::parse("Click to expand"), &ctx());

        assert_eq!(
            output.nodes(),
            ["<details><summary>Click to expand</summary>"]
        );
        assert_eq!(details.depth, 1);
    }

    #[test]
    fn test_container_start_default_title() {
        let mut details = TestDetails { depth: 0 };
        let output = details.start(DirectiveArgs::parse(""), &ctx());

        assert_eq!(output.nodes(), ["<details><summary>Details</summary>"]);
    }

    #[test]
    fn test_container_end() {
        let mut details = TestDetails { depth: 0 };
        let _ = details.start(DirectiveArgs::default(), &ctx());

        assert_eq!(details.end(10), Some("</details>".to_owned()));
        assert_eq!(details.depth, 0);
    }
}
