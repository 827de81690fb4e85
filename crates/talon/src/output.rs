//! Terminal reporting for build results.

use console::{Style, Term};

/// Writes build warnings, summaries and errors to stderr.
pub(crate) struct Output {
    term: Term,
    location: Style,
    warning: Style,
    done: Style,
    error: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            location: Style::new().bold(),
            warning: Style::new().yellow(),
            done: Style::new().green(),
            error: Style::new().red(),
        }
    }

    /// Print page warnings, one per line, with the `path:line` part emphasised.
    pub(crate) fn warnings(&self, warnings: &[String]) {
        for warning in warnings {
            let line = match split_location(warning) {
                (Some(location), message) => format!(
                    "{} {}: {message}",
                    self.warning.apply_to("warning:"),
                    self.location.apply_to(location)
                ),
                (None, message) => format!("{} {message}", self.warning.apply_to("warning:")),
            };
            let _ = self.term.write_line(&line);
        }
    }

    /// Print the closing line of a build.
    pub(crate) fn built(&self, pages: usize, warnings: usize, output_dir: &str) {
        let noun = if pages == 1 { "page" } else { "pages" };
        let line = if warnings > 0 {
            format!("Built {pages} {noun} to {output_dir} ({warnings} warnings)")
        } else {
            format!("Built {pages} {noun} to {output_dir}")
        };
        let _ = self.term.write_line(&self.done.apply_to(line).to_string());
    }

    /// Print a fatal error (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.error.apply_to(msg).to_string());
    }
}

/// Split `path[:line]: message` into its location and message.
fn split_location(warning: &str) -> (Option<&str>, &str) {
    match warning.split_once(": ") {
        Some((location, message)) if !location.contains(' ') => (Some(location), message),
        _ => (None, warning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_location_with_line() {
        assert_eq!(
            split_location("queries/dns.md:4: unclosed container directive `::: query`"),
            (Some("queries/dns.md:4"), "unclosed container directive `::: query`")
        );
    }

    #[test]
    fn split_location_without_line() {
        assert_eq!(
            split_location("guide/cicd.md: invalid front matter: bad"),
            (Some("guide/cicd.md"), "invalid front matter: bad")
        );
    }

    #[test]
    fn split_location_absent() {
        assert_eq!(
            split_location("unclosed container directive `::: query`"),
            (None, "unclosed container directive `::: query`")
        );
    }
}
